//! Mouse events to panel gestures.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Clickable areas of the last rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitRegions {
    /// Left edge of the expanded panel (drag to resize)
    pub resize_handle: Option<Rect>,
    /// Expand/collapse button
    pub toggle_button: Option<Rect>,
    /// Close button inside the panel header
    pub close_button: Option<Rect>,
    /// Whole panel area
    pub panel: Option<Rect>,
}

impl HitRegions {
    fn hit(region: Option<Rect>, column: u16, row: u16) -> bool {
        region.is_some_and(|r| r.contains(Position::new(column, row)))
    }
}

/// Gesture derived from a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Pressed on the panel edge
    DragStart,
    /// Pointer moved to `x_px` pixels from the left viewport edge
    DragMove { x_px: u32 },
    /// Button released
    DragEnd,
    /// Toggle button clicked
    Toggle,
    /// Close button clicked
    Close,
    /// Wheel over the panel (true) or the main area (false); negative is up
    Scroll { in_panel: bool, delta: i16 },
    /// Nothing the app cares about
    None,
}

/// Maps mouse events in terminal cells to gestures in pixels.
#[derive(Debug, Clone, Copy)]
pub struct PointerRouter {
    cell_width_px: u32,
}

impl PointerRouter {
    pub fn new(cell_width_px: u32) -> Self {
        Self {
            cell_width_px: cell_width_px.max(1),
        }
    }

    /// Classify `event` against the regions of the last frame.
    pub fn route(&self, event: &MouseEvent, regions: &HitRegions) -> PointerAction {
        let (column, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if HitRegions::hit(regions.close_button, column, row) {
                    PointerAction::Close
                } else if HitRegions::hit(regions.toggle_button, column, row) {
                    PointerAction::Toggle
                } else if HitRegions::hit(regions.resize_handle, column, row) {
                    PointerAction::DragStart
                } else {
                    PointerAction::None
                }
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                PointerAction::DragMove {
                    x_px: column as u32 * self.cell_width_px,
                }
            }
            MouseEventKind::Up(_) => PointerAction::DragEnd,
            MouseEventKind::ScrollUp => PointerAction::Scroll {
                in_panel: HitRegions::hit(regions.panel, column, row),
                delta: -1,
            },
            MouseEventKind::ScrollDown => PointerAction::Scroll {
                in_panel: HitRegions::hit(regions.panel, column, row),
                delta: 1,
            },
            _ => PointerAction::None,
        }
    }
}
