//! Single-line input box with a send marker.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::Theme;

const SEND_MARKER: &str = "➤";
const SEND_DISABLED: Color = Color::Rgb(0xB0, 0xB8, 0xC1);

/// Input box rendering parameters.
pub struct InputParams<'a> {
    pub theme: &'a Theme,
    pub text: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    /// Request in flight, input locked
    pub busy: bool,
}

/// Render an input box; returns the cursor position when it should be shown.
pub fn render_input(area: Rect, buf: &mut Buffer, params: &InputParams<'_>) -> Option<Position> {
    if area.width < 4 || area.height < 3 {
        return None;
    }
    let theme = params.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border(params.focused))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(area);
    block.render(area, buf);

    // One column for the marker, one for spacing
    let text_width = inner.width.saturating_sub(2) as usize;
    let (shown, style) = if params.text.is_empty() {
        (params.placeholder.to_string(), theme.dim())
    } else {
        (tail_fitting(params.text, text_width), theme.text())
    };
    buf.set_stringn(inner.x, inner.y, &shown, text_width, style);

    let can_send = !params.text.trim().is_empty() && !params.busy;
    let marker_style = Style::default().fg(if can_send {
        theme.accent
    } else {
        SEND_DISABLED
    });
    buf.set_string(inner.right() - 1, inner.y, SEND_MARKER, marker_style);

    if params.focused && !params.busy {
        let typed = if params.text.is_empty() {
            0
        } else {
            shown.width() as u16
        };
        Some(Position::new(inner.x + typed.min(text_width as u16), inner.y))
    } else {
        None
    }
}

/// Longest suffix of `text` that fits in `width` columns.
fn tail_fitting(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = text.len();
    for (index, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = index;
    }
    text[start..].to_string()
}
