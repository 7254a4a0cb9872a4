use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Status bar rendering parameters (extracted from AppState to avoid cyclic deps)
pub struct StatusBarParams<'a> {
    /// Theme reference
    pub theme: &'a Theme,
    /// Status message (message, is_error)
    pub status_message: Option<&'a (String, bool)>,
    /// Newest undismissed warning or error from the log
    pub alert: Option<&'a str>,
    /// Signed-in user name
    pub user: Option<&'a str>,
    /// Panel state summary, e.g. "panel open 410px"
    pub panel_label: &'a str,
}

const HINTS: &str = "Ctrl+Q talk  Alt+G slide  Tab focus  Alt+D dashboard  Alt+X quit";

/// Status bar at the bottom of screen
pub struct StatusBar;

impl StatusBar {
    /// Render status bar
    pub fn render(buf: &mut Buffer, area: Rect, params: &StatusBarParams<'_>) {
        if area.height == 0 {
            return;
        }
        let theme = params.theme;

        // Fill entire line with background color from theme
        for x in area.left()..area.right() {
            buf[(x, area.top())]
                .set_char(' ')
                .set_style(Style::default().bg(theme.surface));
        }

        let left = Self::left_spans(params);
        let right = format!(" {} ", params.panel_label);
        let right_width = right.width() as u16;

        buf.set_line(area.left(), area.top(), &Line::from(left), area.width);
        if area.width > right_width {
            buf.set_string(
                area.right() - right_width,
                area.top(),
                &right,
                Style::default().fg(theme.muted).bg(theme.raised),
            );
        }
    }

    fn left_spans<'a>(params: &StatusBarParams<'a>) -> Vec<Span<'a>> {
        let theme = params.theme;
        let mut spans = Vec::new();
        if let Some(user) = params.user {
            spans.push(Span::styled(
                format!(" {} ", user),
                Style::default()
                    .fg(theme.bg)
                    .bg(theme.accent_alt)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        match (params.status_message, params.alert) {
            (Some((message, is_error)), _) => {
                let color = if *is_error { theme.error } else { theme.fg };
                spans.push(Span::styled(
                    format!(" {}", message),
                    Style::default().fg(color).bg(theme.surface),
                ));
            }
            (None, Some(alert)) => spans.push(Span::styled(
                format!(" {}", alert),
                Style::default().fg(theme.warning).bg(theme.surface),
            )),
            (None, None) => spans.push(Span::styled(
                format!(" {}", HINTS),
                Style::default().fg(theme.muted).bg(theme.surface),
            )),
        }
        spans
    }
}
