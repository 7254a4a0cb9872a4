//! Main application module.
//!
//! Contains the App struct and all event handlers.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::{backend::Backend, Frame, Terminal};

use truecost_app_event::{DefaultHotkeyProcessor, Event, EventHandler, PointerRouter};
use truecost_config::Config;
use truecost_panel::PanelController;
use truecost_talk::{flows, TalkApi};

use crate::state::{AppState, Focus};

mod actions;
mod key_handler;
mod mouse_handler;
mod tasks;

pub use tasks::{TaskQueue, TaskResult};

/// Initialize the logger from config.
///
/// Logs go to `logging.file_path` when set, otherwise to the cache directory.
pub fn init_logging(config: &Config) {
    let log_file_path = match config.logging.file_path {
        Some(ref path) => PathBuf::from(path),
        None => Config::default_log_file_path()
            .unwrap_or_else(|_| std::env::temp_dir().join("truecost.log")),
    };
    let min_log_level = truecost_logger::LogLevel::from_str(&config.logging.min_level)
        .unwrap_or(truecost_logger::LogLevel::Info);
    truecost_logger::init(
        log_file_path,
        truecost_config::defaults::MAX_LOG_ENTRIES,
        min_log_level,
    );
    truecost_logger::info("Application started");
}

/// Main application
pub struct App {
    state: AppState,
    panel: PanelController,
    event_handler: EventHandler,
    /// Global hotkey processor
    hotkey_processor: DefaultHotkeyProcessor,
    pointer_router: PointerRouter,
    api: Arc<dyn TalkApi>,
    tasks: TaskQueue,
}

impl App {
    /// Create a new application
    pub fn new(config: Config, api: Arc<dyn TalkApi>) -> Self {
        let panel = PanelController::from_settings(&config.panel);
        let event_handler =
            EventHandler::new(Duration::from_millis(config.general.tick_interval_ms));
        let pointer_router = PointerRouter::new(config.panel.cell_width_px);
        Self {
            state: AppState::new(config),
            panel,
            event_handler,
            hotkey_processor: DefaultHotkeyProcessor::new(),
            pointer_router,
            api,
            tasks: TaskQueue::new(),
        }
    }

    /// Create a new application with specified terminal size
    pub fn new_with_size(config: Config, api: Arc<dyn TalkApi>, width: u16, height: u16) -> Self {
        let mut app = Self::new(config, api);
        app.state.update_terminal_size(width, height);
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn panel(&self) -> &PanelController {
        &self.panel
    }

    /// Mount the side panel and start loading the session.
    pub fn start(&mut self) {
        self.panel.mount(self.state.viewport_px());
        self.state.session_loading = true;
        let api = Arc::clone(&self.api);
        let spawned = self.tasks.spawn("session", move || {
            TaskResult::Session(flows::load_session(api.as_ref()))
        });
        if let Err(e) = spawned {
            truecost_logger::error(format!("{:#}", e));
            self.state.session_loading = false;
        }
    }

    /// Unmount the side panel, releasing its listeners and pending timer.
    pub fn shutdown(&mut self) {
        self.panel.unmount();
        truecost_logger::info("Application stopped");
    }

    /// Run the main application loop
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        render_fn: impl Fn(&mut Frame<'_>, &mut AppState, &PanelController),
    ) -> Result<()> {
        // Initialize terminal dimensions
        let size = terminal.size()?;
        self.state.update_terminal_size(size.width, size.height);
        self.start();

        let result = self.event_loop(terminal, render_fn);
        self.shutdown();
        result
    }

    fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        render_fn: impl Fn(&mut Frame<'_>, &mut AppState, &PanelController),
    ) -> Result<()> {
        while !self.state.should_quit {
            // Wake up in time for a pending panel transition
            match self.event_handler.next_before(self.panel.next_deadline())? {
                Event::Key(key) => {
                    self.handle_key_event(key)?;
                    self.state.needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    if self.handle_mouse_event(mouse)? {
                        self.state.needs_redraw = true;
                    }
                }
                Event::Resize(width, height) => {
                    self.handle_resize(width, height);
                }
                Event::Tick => {}
            }

            // Timers and background results are checked after every event
            self.on_tick(Instant::now());

            // Render UI only when needed
            if self.state.needs_redraw {
                terminal.draw(|frame| {
                    render_fn(frame, &mut self.state, &self.panel);
                })?;
                self.state.needs_redraw = false;
            }
        }

        Ok(())
    }

    /// Fire due panel transitions and apply finished background tasks.
    pub fn on_tick(&mut self, now: Instant) {
        if self.panel.tick(now) {
            self.after_panel_change();
            self.state.needs_redraw = true;
        }
        for result in self.tasks.drain() {
            self.apply_task(result);
            self.state.needs_redraw = true;
        }
        let latest = truecost_logger::latest_at_least(truecost_logger::LogLevel::Warn);
        if self.state.note_log_alert(latest) {
            self.state.needs_redraw = true;
        }
    }

    /// Terminal resized: forward the new viewport width to the panel.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.state.update_terminal_size(width, height);
        if self
            .panel
            .is_listening(truecost_panel::ListenerKind::ViewportResize)
        {
            self.panel.on_viewport_resize(self.state.viewport_px());
        }
        self.state.needs_redraw = true;
    }

    /// Keep focus on a visible input after the panel changed.
    fn after_panel_change(&mut self) {
        if self.state.focus == Focus::Talk && !self.panel.state().is_shown() {
            self.state.focus = Focus::Query;
        }
    }
}
