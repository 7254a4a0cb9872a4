//! Color palette.

use ratatui::style::{Color, Modifier, Style};

use truecost_talk::RatingBand;

/// Colors used across the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Application background
    pub bg: Color,
    /// Panels, cards and input boxes
    pub surface: Color,
    /// Borders and nested blocks
    pub raised: Color,
    /// Primary text
    pub fg: Color,
    /// Secondary text
    pub muted: Color,
    /// Highlight (send button, links, user messages)
    pub accent: Color,
    /// Secondary highlight
    pub accent_alt: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(0x1A, 0x24, 0x20),
            surface: Color::Rgb(0x38, 0x4D, 0x48),
            raised: Color::Rgb(0x4A, 0x5D, 0x57),
            fg: Color::Rgb(0xF5, 0xF5, 0xF5),
            muted: Color::Rgb(0xD0, 0xD0, 0xD0),
            accent: Color::Rgb(0x9B, 0xC5, 0x3D),
            accent_alt: Color::Rgb(0x7F, 0xB0, 0x69),
            warning: Color::Rgb(0xFF, 0xA5, 0x00),
            error: Color::Rgb(0xFF, 0x66, 0x66),
        }
    }
}

impl Theme {
    /// Badge color for a rating band.
    pub fn band_color(&self, band: RatingBand) -> Color {
        match band {
            RatingBand::Excellent => self.accent_alt,
            RatingBand::Good => self.accent,
            RatingBand::Fair => self.warning,
            RatingBand::Poor => Color::Rgb(0xFF, 0x6B, 0x6B),
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Border style, accented when focused.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.raised)
        }
    }
}
