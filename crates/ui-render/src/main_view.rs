//! Query view: heading, query box, latest result and recent analyses.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Paragraph, Widget, Wrap},
};

use truecost_talk::{AnalysisOutcome, Card};

use crate::card::{card_lines, wrapped_height, CardView};
use crate::input::{render_input, InputParams};
use crate::theme::Theme;

pub const HEADING: &str = "Beyond the Surface : The Real Cost";
pub const QUERY_PLACEHOLDER: &str = "Start your query...";
const MAX_CONTENT_WIDTH: u16 = 88;

/// Query view rendering parameters.
pub struct MainViewParams<'a> {
    pub theme: &'a Theme,
    pub input: &'a str,
    pub input_focused: bool,
    /// Analysis request in flight
    pub loading: bool,
    pub outcome: Option<&'a AnalysisOutcome>,
    pub recent: &'a [Card],
    /// Session still loading
    pub recent_loading: bool,
    /// Disclosure state of the newest card
    pub card_view: CardView,
    /// Rows scrolled below the query box
    pub scroll: u16,
}

/// Render the query view; returns the input cursor position if focused.
pub fn render_main_view(area: Rect, buf: &mut Buffer, params: &MainViewParams<'_>) -> Option<Position> {
    let theme = params.theme;
    Block::default()
        .style(Style::default().bg(theme.bg))
        .render(area, buf);
    if area.height < 6 || area.width < 10 {
        return None;
    }

    let width = area.width.min(MAX_CONTENT_WIDTH);
    let column = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);

    let heading = Rect::new(column.x, column.y + 1, column.width, 1);
    Paragraph::new(HEADING)
        .style(theme.heading())
        .alignment(Alignment::Center)
        .render(heading, buf);

    let input_area = Rect::new(column.x, column.y + 3, column.width, 3);
    let cursor = render_input(
        input_area,
        buf,
        &InputParams {
            theme,
            text: params.input,
            placeholder: QUERY_PLACEHOLDER,
            focused: params.input_focused,
            busy: params.loading,
        },
    );

    let body_top = input_area.bottom() + 1;
    if body_top >= column.bottom() {
        return cursor;
    }
    let body = Rect::new(column.x, body_top, column.width, column.bottom() - body_top);
    let lines = body_lines(params);
    let scroll = params
        .scroll
        .min(wrapped_height(&lines, body.width).saturating_sub(1));
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .render(body, buf);

    cursor
}

fn body_lines(params: &MainViewParams<'_>) -> Vec<Line<'static>> {
    let theme = params.theme;
    let mut lines = Vec::new();

    if params.loading {
        lines.push(Line::styled("Loading...", theme.dim()).alignment(Alignment::Center));
        lines.push(Line::default());
    } else if let Some(outcome) = params.outcome {
        match outcome {
            AnalysisOutcome::Card(card) => {
                lines.extend(card_lines(card, params.card_view, theme));
                lines.push(Line::default());
            }
            AnalysisOutcome::Message(text) => {
                lines.push(Line::styled(text.clone(), theme.text()));
                lines.push(Line::default());
            }
            AnalysisOutcome::Error(error) => {
                lines.push(
                    Line::styled(error.clone(), Style::default().fg(theme.error))
                        .alignment(Alignment::Center),
                );
                lines.push(Line::default());
            }
            AnalysisOutcome::Empty => {}
        }
    }

    lines.push(Line::styled("Your Recent Analyses", theme.heading()));
    lines.push(Line::default());
    if params.recent_loading {
        lines.push(Line::styled("Loading...", theme.dim()).alignment(Alignment::Center));
    } else if params.recent.is_empty() {
        lines.push(
            Line::styled("No recent analyses found.", theme.dim()).alignment(Alignment::Center),
        );
    } else {
        for card in params.recent {
            lines.extend(card_lines(card, CardView::COLLAPSED, theme));
            lines.push(Line::styled("─".repeat(24), Style::default().fg(theme.raised)));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn params<'a>(theme: &'a Theme, outcome: Option<&'a AnalysisOutcome>) -> MainViewParams<'a> {
        MainViewParams {
            theme,
            input: "",
            input_focused: true,
            loading: false,
            outcome,
            recent: &[],
            recent_loading: false,
            card_view: CardView::default(),
            scroll: 0,
        }
    }

    #[test]
    fn test_heading_and_empty_history() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let cursor = render_main_view(area, &mut buf, &params(&theme, None));
        let text = buffer_text(&buf);
        assert!(text.contains(HEADING));
        assert!(text.contains("Your Recent Analyses"));
        assert!(text.contains("No recent analyses found."));
        assert_eq!(cursor, Some(Position::new(1, 4)));
    }

    #[test]
    fn test_error_outcome_is_shown() {
        let theme = Theme::default();
        let outcome = AnalysisOutcome::Error("Product not found".to_string());
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        render_main_view(area, &mut buf, &params(&theme, Some(&outcome)));
        assert!(buffer_text(&buf).contains("Product not found"));
    }

    #[test]
    fn test_loading_replaces_outcome() {
        let theme = Theme::default();
        let outcome = AnalysisOutcome::Message("old".to_string());
        let mut p = params(&theme, Some(&outcome));
        p.loading = true;
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let cursor = render_main_view(area, &mut buf, &p);
        let text = buffer_text(&buf);
        assert!(text.contains("Loading..."));
        assert!(!text.contains("old"));
        assert_eq!(cursor, None);
    }
}
