//! Panel state and its derived phase.

use crate::geometry::ViewportMode;

/// Observable state of the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    /// Panel occupies layout space
    pub open: bool,
    /// Panel renders at zero width even if open
    pub collapsed: bool,
    /// Current width in pixels
    pub width: u32,
    /// Layout mode from the last viewport width
    pub viewport_mode: ViewportMode,
    /// A drag-resize gesture is in progress
    pub resizing: bool,
}

impl PanelState {
    /// State at mount: closed and collapsed.
    pub fn initial(width: u32) -> Self {
        Self {
            open: false,
            collapsed: true,
            width,
            viewport_mode: ViewportMode::Desktop,
            resizing: false,
        }
    }

    /// Phase derived from `open` and `collapsed`.
    pub fn phase(&self) -> PanelPhase {
        match (self.open, self.collapsed) {
            (false, _) => PanelPhase::Closed,
            (true, true) => PanelPhase::Expanding,
            (true, false) => PanelPhase::Open,
        }
    }

    /// Panel is visible at full width.
    pub fn is_shown(&self) -> bool {
        self.open && !self.collapsed
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport_mode == ViewportMode::Mobile
    }
}

/// Coarse panel phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    /// Not in layout
    Closed,
    /// In layout but still collapsed (entering, or leaving before removal)
    Expanding,
    /// In layout at full width
    Open,
}
