use std::time::Instant;

use anyhow::Result;
use crossterm::event::MouseEvent;

use truecost_app_event::PointerAction;
use truecost_panel::ListenerKind;

use super::App;
use crate::state::{Focus, View};

const WHEEL_ROWS: i32 = 3;

impl App {
    /// Handle mouse events. Returns true if something visible changed.
    pub(super) fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<bool> {
        let action = self
            .pointer_router
            .route(&mouse, &self.state.hit_regions);
        Ok(self.handle_pointer_action(action))
    }

    fn handle_pointer_action(&mut self, action: PointerAction) -> bool {
        match action {
            PointerAction::DragStart => {
                self.panel.on_drag_start();
                self.panel.state().resizing
            }
            // Move and release only reach the panel during a drag
            PointerAction::DragMove { x_px } => {
                if !self.panel.is_listening(ListenerKind::PointerMove) {
                    return false;
                }
                let before = self.panel.state().width;
                self.panel.on_drag_move(x_px);
                self.panel.state().width != before
            }
            PointerAction::DragEnd => {
                if !self.panel.is_listening(ListenerKind::PointerUp) {
                    return false;
                }
                self.panel.on_drag_end();
                true
            }
            PointerAction::Toggle => {
                self.panel.toggle(Instant::now());
                self.after_panel_change();
                true
            }
            PointerAction::Close => {
                self.panel.collapse(Instant::now());
                self.after_panel_change();
                true
            }
            PointerAction::Scroll { in_panel, delta } => {
                let rows = delta as i32 * WHEEL_ROWS;
                if self.state.view == View::Dashboard && !in_panel {
                    let scroll = self.state.dashboard_scroll as i32 + rows;
                    self.state.dashboard_scroll = scroll.clamp(0, u16::MAX as i32) as u16;
                    return true;
                }
                let focus = self.state.focus;
                self.state.focus = if in_panel { Focus::Talk } else { Focus::Query };
                self.scroll_focused(rows);
                self.state.focus = focus;
                true
            }
            PointerAction::None => false,
        }
    }
}
