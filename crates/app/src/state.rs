//! Application state.

use ratatui::layout::Position;

use truecost_app_event::HitRegions;
use truecost_config::Config;
use truecost_logger::LogEntry;
use truecost_panel::CellMetrics;
use truecost_talk::{AnalysisOutcome, Card, ChatLog, RecentCards, User};
use truecost_ui_render::{CardView, Theme};

/// Which input receives typed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Query,
    Talk,
}

/// Which main view is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Query,
    Dashboard,
}

/// Terminal dimensions in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

/// Global application state
#[derive(Debug)]
pub struct AppState {
    /// Should application quit
    pub should_quit: bool,
    /// Application configuration
    pub config: Config,
    pub theme: Theme,
    pub terminal: TerminalSize,
    /// Pixel size of a terminal cell
    pub cells: CellMetrics,
    pub focus: Focus,
    pub view: View,

    /// Main query box
    pub query_input: String,
    /// Side chat input
    pub talk_input: String,
    pub chat: ChatLog,
    /// Analysis request in flight
    pub main_loading: bool,
    /// Latest analysis result
    pub outcome: Option<AnalysisOutcome>,
    /// Disclosure state of the latest card
    pub card_view: CardView,

    /// Session user, `None` when signed out
    pub user: Option<User>,
    /// Session still loading
    pub session_loading: bool,
    /// Newest cards shown under the query box
    pub recent: RecentCards,
    /// Every stored card, newest first (dashboard)
    pub all_cards: Vec<Card>,

    pub main_scroll: u16,
    pub talk_scroll_back: u16,
    pub dashboard_scroll: u16,

    /// Status message (message, is_error)
    pub status_message: Option<(String, bool)>,
    /// Newest warning or error from the log not yet dismissed
    pub log_alert: Option<LogEntry>,
    /// Sequence number of the last dismissed log entry
    pub log_seen: Option<u64>,
    /// Clickable areas of the last frame
    pub hit_regions: HitRegions,
    /// Cursor of the focused input in the last frame
    pub cursor: Option<Position>,
    /// Flag indicating UI needs to be redrawn
    pub needs_redraw: bool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cells = CellMetrics::new(config.panel.cell_width_px);
        let recent = RecentCards::new(config.general.recent_cards);
        Self {
            should_quit: false,
            config,
            theme: Theme::default(),
            terminal: TerminalSize::default(),
            cells,
            focus: Focus::Query,
            view: View::Query,
            query_input: String::new(),
            talk_input: String::new(),
            chat: ChatLog::new(),
            main_loading: false,
            outcome: None,
            card_view: CardView::default(),
            user: None,
            session_loading: true,
            recent,
            all_cards: Vec::new(),
            main_scroll: 0,
            talk_scroll_back: 0,
            dashboard_scroll: 0,
            status_message: None,
            log_alert: None,
            log_seen: None,
            hit_regions: HitRegions::default(),
            cursor: None,
            needs_redraw: true, // Initial draw needed
        }
    }

    /// Update terminal dimensions
    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal = TerminalSize { width, height };
    }

    /// Viewport width in pixels.
    pub fn viewport_px(&self) -> u32 {
        self.cells.cols_to_px(self.terminal.width)
    }

    /// Name shown for the signed-in user.
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| {
            if u.name.is_empty() {
                u.email.as_str()
            } else {
                u.name.as_str()
            }
        })
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), false));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), true));
    }

    /// Dismiss the status message and the current log alert.
    pub fn clear_status(&mut self) {
        self.status_message = None;
        if let Some(alert) = self.log_alert.take() {
            self.log_seen = Some(alert.seq);
        }
    }

    /// Show `entry` unless it was already shown or dismissed.
    /// Returns true if the alert changed.
    pub fn note_log_alert(&mut self, entry: Option<LogEntry>) -> bool {
        let Some(entry) = entry else {
            return false;
        };
        let already_seen = self.log_seen.is_some_and(|seen| entry.seq <= seen);
        let already_shown = self.log_alert.as_ref().is_some_and(|a| a.seq == entry.seq);
        if already_seen || already_shown {
            return false;
        }
        self.log_alert = Some(entry);
        true
    }

    /// Status line text for the current log alert.
    pub fn log_alert_text(&self) -> Option<String> {
        self.log_alert
            .as_ref()
            .map(|e| format!("[{}] {}: {}", e.timestamp, e.level.to_str(), e.message))
    }

    /// Input that receives typed text.
    pub fn focused_input(&mut self) -> &mut String {
        match self.focus {
            Focus::Query => &mut self.query_input,
            Focus::Talk => &mut self.talk_input,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_px_uses_cell_width() {
        let mut state = AppState::default();
        state.update_terminal_size(128, 40);
        assert_eq!(state.viewport_px(), 1024);
    }

    #[test]
    fn test_username_falls_back_to_email() {
        let mut state = AppState::default();
        assert_eq!(state.username(), None);
        state.user = Some(User {
            email: "ada@example.org".to_string(),
            name: String::new(),
        });
        assert_eq!(state.username(), Some("ada@example.org"));
    }

    #[test]
    fn test_focused_input_follows_focus() {
        let mut state = AppState::default();
        state.focused_input().push('a');
        state.focus = Focus::Talk;
        state.focused_input().push('b');
        assert_eq!(state.query_input, "a");
        assert_eq!(state.talk_input, "b");
    }

    fn entry(seq: u64, message: &str) -> LogEntry {
        LogEntry {
            seq,
            timestamp: "12:00:00".to_string(),
            level: truecost_logger::LogLevel::Error,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_log_alert_stays_dismissed() {
        let mut state = AppState::default();
        assert!(!state.note_log_alert(None));

        assert!(state.note_log_alert(Some(entry(4, "auth request failed"))));
        assert_eq!(
            state.log_alert_text().as_deref(),
            Some("[12:00:00] ERROR: auth request failed")
        );
        assert!(!state.note_log_alert(Some(entry(4, "auth request failed"))));

        state.clear_status();
        assert!(state.log_alert.is_none());
        assert!(!state.note_log_alert(Some(entry(4, "auth request failed"))));

        assert!(state.note_log_alert(Some(entry(7, "cards request failed"))));
    }
}
