//! Width rules for the side panel.
//!
//! All widths are in pixels. Computed widths are rounded to the nearest
//! pixel (halves away from zero) before clamping.

use truecost_config::PanelSettings;

/// Layout mode derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportMode {
    /// Panel sits beside the main content and can be resized
    #[default]
    Desktop,
    /// Panel overlays the main content at a fixed share of the viewport
    Mobile,
}

/// Breakpoint and width bounds of the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    /// Viewport widths at or above this are desktop
    pub breakpoint: u32,
    /// Minimum desktop width
    pub min_width: u32,
    /// Maximum desktop width
    pub max_width: u32,
    /// Viewport share on desktop
    pub desktop_ratio: f64,
    /// Viewport share on mobile
    pub mobile_ratio: f64,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::from_settings(&PanelSettings::default())
    }
}

impl PanelGeometry {
    /// Build geometry from config settings.
    pub fn from_settings(settings: &PanelSettings) -> Self {
        Self {
            breakpoint: settings.breakpoint_px,
            min_width: settings.min_width_px,
            max_width: settings.max_width_px,
            desktop_ratio: settings.desktop_ratio,
            mobile_ratio: settings.mobile_ratio,
        }
    }

    /// Layout mode for a viewport width.
    pub fn mode_for(&self, viewport_width: u32) -> ViewportMode {
        if viewport_width < self.breakpoint {
            ViewportMode::Mobile
        } else {
            ViewportMode::Desktop
        }
    }

    /// Mode and panel width for a viewport width.
    pub fn width_for_viewport(&self, viewport_width: u32) -> (ViewportMode, u32) {
        match self.mode_for(viewport_width) {
            ViewportMode::Mobile => (
                ViewportMode::Mobile,
                round_px(viewport_width as f64 * self.mobile_ratio),
            ),
            ViewportMode::Desktop => {
                let preferred = round_px(viewport_width as f64 * self.desktop_ratio);
                (ViewportMode::Desktop, self.clamp(preferred as i64))
            }
        }
    }

    /// Width of the panel when its left edge sits at `pointer_x`.
    pub fn width_for_pointer(&self, viewport_width: u32, pointer_x: u32) -> u32 {
        self.clamp(viewport_width as i64 - pointer_x as i64)
    }

    /// Clamp a width into the desktop bounds.
    pub fn clamp(&self, width: i64) -> u32 {
        width.clamp(self.min_width as i64, self.max_width as i64) as u32
    }
}

fn round_px(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Conversion between terminal cells and pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    /// Width of one column in pixels
    pub cell_width_px: u32,
}

impl CellMetrics {
    pub fn new(cell_width_px: u32) -> Self {
        Self {
            cell_width_px: cell_width_px.max(1),
        }
    }

    /// Pixel width of `cols` columns.
    pub fn cols_to_px(&self, cols: u16) -> u32 {
        cols as u32 * self.cell_width_px
    }

    /// Nearest column count for a pixel width.
    pub fn px_to_cols(&self, px: u32) -> u16 {
        let cols = (px + self.cell_width_px / 2) / self.cell_width_px;
        cols.min(u16::MAX as u32) as u16
    }
}
