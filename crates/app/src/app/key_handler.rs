use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use truecost_app_event::{HotkeyAction, HotkeyProcessor};
use truecost_panel::ListenerKind;

use super::App;
use crate::state::{Focus, View};

const PAGE_ROWS: u16 = 10;

impl App {
    /// Handle keyboard events
    pub(super) fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Any key press dismisses the status message
        self.state.clear_status();

        if let Some(action) = self.hotkey_processor.process_hotkey(&key) {
            self.handle_hotkey(action);
            return Ok(());
        }

        match self.state.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Query => self.handle_input_key(key),
        }
        Ok(())
    }

    fn handle_hotkey(&mut self, action: HotkeyAction) {
        match action {
            HotkeyAction::TogglePanelShortcut => {
                // Only while the panel's keyboard listener is registered
                if self.panel.is_listening(ListenerKind::KeyDown) {
                    self.panel.toggle_via_shortcut();
                    self.after_panel_change();
                }
            }
            HotkeyAction::TogglePanel => {
                self.panel.toggle(Instant::now());
                self.after_panel_change();
            }
            HotkeyAction::SwitchFocus => {
                self.state.focus = match self.state.focus {
                    Focus::Query if self.panel.state().is_shown() => Focus::Talk,
                    _ => Focus::Query,
                };
            }
            HotkeyAction::ToggleDashboard => self.toggle_dashboard(),
            HotkeyAction::ToggleCardDetails => {
                self.state.card_view = self.state.card_view.toggled();
            }
            HotkeyAction::Logout => self.start_logout(),
            HotkeyAction::Quit => self.state.should_quit = true,
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.state.view = View::Query;
            return;
        }
        let scroll = &mut self.state.dashboard_scroll;
        match key.code {
            KeyCode::Up => *scroll = scroll.saturating_sub(1),
            KeyCode::Down => *scroll = scroll.saturating_add(1),
            KeyCode::PageUp => *scroll = scroll.saturating_sub(PAGE_ROWS),
            KeyCode::PageDown => *scroll = scroll.saturating_add(PAGE_ROWS),
            KeyCode::Home => *scroll = 0,
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        // Inputs are locked while their request is in flight
        let locked = match self.state.focus {
            Focus::Query => self.state.main_loading,
            Focus::Talk => self.state.chat.is_waiting(),
        };

        match key.code {
            KeyCode::Enter if !locked => match self.state.focus {
                Focus::Query => self.submit_query(),
                Focus::Talk => self.submit_talk(),
            },
            KeyCode::Char(c)
                if !locked
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.state.focused_input().push(c);
            }
            KeyCode::Backspace if !locked => {
                self.state.focused_input().pop();
            }
            KeyCode::Esc if !locked => self.state.focused_input().clear(),
            KeyCode::Up => self.scroll_focused(-1),
            KeyCode::Down => self.scroll_focused(1),
            KeyCode::PageUp => self.scroll_focused(-(PAGE_ROWS as i32)),
            KeyCode::PageDown => self.scroll_focused(PAGE_ROWS as i32),
            _ => {}
        }
    }

    /// Scroll the content next to the focused input; negative is up.
    pub(super) fn scroll_focused(&mut self, delta: i32) {
        match self.state.focus {
            Focus::Query => {
                self.state.main_scroll = apply_delta(self.state.main_scroll, delta);
            }
            Focus::Talk => {
                // Chat is anchored at the bottom, scrolling up moves back in history
                self.state.talk_scroll_back = apply_delta(self.state.talk_scroll_back, -delta);
            }
        }
    }
}

fn apply_delta(value: u16, delta: i32) -> u16 {
    (value as i32 + delta).clamp(0, u16::MAX as i32) as u16
}
