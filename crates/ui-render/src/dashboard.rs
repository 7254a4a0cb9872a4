//! Dashboard: every stored card with totals.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use truecost_talk::{Card, DashboardStats};

use crate::card::{card_lines, wrapped_height, CardView};
use crate::theme::Theme;

const MAX_CONTENT_WIDTH: u16 = 100;

/// Dashboard rendering parameters.
pub struct DashboardParams<'a> {
    pub theme: &'a Theme,
    /// Display name, `None` when signed out
    pub username: Option<&'a str>,
    pub stats: DashboardStats,
    pub cards: &'a [Card],
    pub scroll: u16,
}

/// Render the dashboard view.
pub fn render_dashboard(area: Rect, buf: &mut Buffer, params: &DashboardParams<'_>) {
    let theme = params.theme;
    Block::default()
        .style(Style::default().bg(theme.bg))
        .render(area, buf);
    if area.width < 10 || area.height < 3 {
        return;
    }

    let width = area.width.min(MAX_CONTENT_WIDTH);
    let column = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + 1,
        width,
        area.height - 1,
    );

    let lines = dashboard_lines(params);
    let scroll = params
        .scroll
        .min(wrapped_height(&lines, column.width).saturating_sub(1));
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .render(column, buf);
}

fn dashboard_lines(params: &DashboardParams<'_>) -> Vec<Line<'static>> {
    let theme = params.theme;
    let mut lines = vec![Line::styled("Your Analysis Dashboard", theme.heading())];

    let Some(username) = params.username else {
        lines.push(Line::default());
        lines.push(Line::styled(
            "Sign in on the web app to see your analyses.",
            theme.dim(),
        ));
        return lines;
    };

    lines.push(Line::styled(
        format!(
            "Welcome back, {}! Here are all your sustainability analyses.",
            username
        ),
        theme.dim(),
    ));
    lines.push(Line::default());

    let number = |value: String, color| {
        Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(vec![
        number(params.stats.total.to_string(), theme.accent),
        Span::styled(" Total Analyses    ", theme.dim()),
        number(params.stats.average_rating.to_string(), theme.accent_alt),
        Span::styled(" Avg. Score    ", theme.dim()),
        Span::styled("Alt+L Logout", Style::default().fg(theme.muted)),
    ]));
    lines.push(Line::default());

    if params.cards.is_empty() {
        lines.push(Line::styled("No Analyses Yet", theme.heading()).alignment(Alignment::Center));
        lines.push(
            Line::styled(
                "Start your sustainability journey by analyzing your first product.",
                theme.dim(),
            )
            .alignment(Alignment::Center),
        );
        return lines;
    }

    for card in params.cards {
        lines.extend(card_lines(card, CardView::COLLAPSED, theme));
        lines.push(Line::styled(
            "─".repeat(24),
            Style::default().fg(theme.raised),
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .flat_map(|y| (area.left()..area.right()).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect()
    }

    fn card(rating: f64) -> Card {
        Card {
            id: None,
            rating,
            text: "Recycled cotton tote".to_string(),
            created_at: None,
            citations: Vec::new(),
            recommendations: Vec::new(),
            suggested_questions: Vec::new(),
        }
    }

    #[test]
    fn test_stats_line() {
        let theme = Theme::default();
        let cards = vec![card(80.0), card(65.0)];
        let params = DashboardParams {
            theme: &theme,
            username: Some("Ada"),
            stats: DashboardStats::from_cards(&cards),
            cards: &cards,
            scroll: 0,
        };
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        render_dashboard(area, &mut buf, &params);
        let out = text(&buf);
        assert!(out.contains("Welcome back, Ada!"));
        assert!(out.contains("2 Total Analyses"));
        assert!(out.contains("73 Avg. Score"));
        assert!(out.contains("Recycled cotton tote"));
    }

    #[test]
    fn test_signed_out() {
        let theme = Theme::default();
        let params = DashboardParams {
            theme: &theme,
            username: None,
            stats: DashboardStats::from_cards(&[]),
            cards: &[],
            scroll: 0,
        };
        let area = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(area);
        render_dashboard(area, &mut buf, &params);
        assert!(text(&buf).contains("Sign in on the web app"));
    }
}
