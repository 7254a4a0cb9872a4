//! Widths handed to the rendering layer.

use crate::state::PanelState;

/// Gap between the toggle button and the panel edge (or viewport edge).
pub const TOGGLE_MARGIN: u32 = 14;
/// How far the toggle button sits inside an open mobile panel.
pub const MOBILE_TOGGLE_INSET: u32 = 10;

/// Pixel layout for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    /// Rendered panel width (zero while collapsed or closed)
    pub panel_width: u32,
    /// Distance of the toggle button from the right viewport edge
    pub toggle_offset: u32,
    /// Toggle button is drawn
    pub toggle_visible: bool,
    /// Width left for the main content
    pub main_width: u32,
    /// Panel overlays the main content instead of sitting beside it
    pub overlay: bool,
}

impl PanelLayout {
    /// Compute the layout for `state` in a viewport `viewport_width` wide.
    pub fn compute(state: &PanelState, viewport_width: u32) -> Self {
        let shown = state.is_shown();
        let mobile = state.is_mobile();

        let panel_width = if shown {
            state.width.min(viewport_width)
        } else {
            0
        };

        let toggle_offset = if state.collapsed {
            TOGGLE_MARGIN
        } else if mobile && state.open {
            state.width.saturating_sub(MOBILE_TOGGLE_INSET)
        } else {
            state.width + TOGGLE_MARGIN
        };

        let main_width = if shown && !mobile {
            viewport_width.saturating_sub(panel_width)
        } else {
            viewport_width
        };

        Self {
            panel_width,
            toggle_offset,
            toggle_visible: !(mobile && shown),
            main_width,
            overlay: mobile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ViewportMode;

    fn state(open: bool, collapsed: bool, width: u32, mode: ViewportMode) -> PanelState {
        PanelState {
            open,
            collapsed,
            width,
            viewport_mode: mode,
            resizing: false,
        }
    }

    #[test]
    fn test_closed_panel_leaves_full_width() {
        let layout = PanelLayout::compute(&state(false, true, 410, ViewportMode::Desktop), 1024);
        assert_eq!(layout.panel_width, 0);
        assert_eq!(layout.main_width, 1024);
        assert_eq!(layout.toggle_offset, TOGGLE_MARGIN);
        assert!(layout.toggle_visible);
    }

    #[test]
    fn test_open_desktop_splits_width() {
        let layout = PanelLayout::compute(&state(true, false, 410, ViewportMode::Desktop), 1024);
        assert_eq!(layout.panel_width, 410);
        assert_eq!(layout.main_width, 614);
        assert_eq!(layout.toggle_offset, 424);
        assert!(!layout.overlay);
    }

    #[test]
    fn test_expanding_renders_zero_width() {
        let layout = PanelLayout::compute(&state(true, true, 410, ViewportMode::Desktop), 1024);
        assert_eq!(layout.panel_width, 0);
        assert_eq!(layout.main_width, 1024);
    }

    #[test]
    fn test_open_mobile_overlays_and_hides_toggle() {
        let layout = PanelLayout::compute(&state(true, false, 540, ViewportMode::Mobile), 600);
        assert_eq!(layout.panel_width, 540);
        assert_eq!(layout.main_width, 600);
        assert_eq!(layout.toggle_offset, 530);
        assert!(!layout.toggle_visible);
        assert!(layout.overlay);
    }
}
