//! Analysis card rendering.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use truecost_talk::{Card, Link};

use crate::theme::Theme;

/// Per-card disclosure state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardView {
    /// Full analysis text instead of the preview
    pub expanded: bool,
    /// Every suggested question instead of the first few
    pub show_all_questions: bool,
}

impl CardView {
    pub const COLLAPSED: CardView = CardView {
        expanded: false,
        show_all_questions: false,
    };

    /// Flip both disclosures together.
    pub fn toggled(self) -> Self {
        let open = !(self.expanded || self.show_all_questions);
        Self {
            expanded: open,
            show_all_questions: open,
        }
    }
}

const BADGE_FG: Color = Color::Rgb(0x1A, 0x2B, 0x24);

/// Lines for one card, ready for a wrapping paragraph.
pub fn card_lines(card: &Card, view: CardView, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let badge = Span::styled(
        format!(" {} ", card.rating_label()),
        Style::default()
            .fg(BADGE_FG)
            .bg(theme.band_color(card.band()))
            .add_modifier(Modifier::BOLD),
    );
    let mut header = vec![badge, Span::styled("  Analysis Score", theme.dim())];
    if let Some(date) = card.created_label() {
        header.push(Span::styled(format!("  {}", date), theme.dim()));
    }
    lines.push(Line::from(header));
    lines.push(Line::default());

    lines.push(Line::styled("Analysis", theme.heading()));
    let mut text = vec![Span::styled(card.preview(view.expanded), theme.text())];
    if card.is_truncated() {
        let toggle = if view.expanded {
            " Show Less"
        } else {
            " Read More"
        };
        text.push(Span::styled(toggle, Style::default().fg(theme.accent)));
    }
    lines.push(Line::from(text));

    push_links(&mut lines, "Sources & Citations", &card.citations, theme);
    push_links(
        &mut lines,
        "Recommended Products",
        &card.recommendations,
        theme,
    );

    if !card.suggested_questions.is_empty() {
        lines.push(Line::default());
        lines.push(Line::styled("Suggested Questions", theme.heading()));
        for question in card.visible_questions(view.show_all_questions) {
            lines.push(Line::from(vec![
                Span::styled("  › ", Style::default().fg(theme.accent_alt)),
                Span::styled(question.clone(), theme.text()),
            ]));
        }
        let hidden = card.hidden_question_count();
        if hidden > 0 {
            let label = if view.show_all_questions {
                "Show Less".to_string()
            } else {
                format!("Show {} More Questions", hidden)
            };
            lines.push(Line::styled(
                format!("  {}", label),
                Style::default().fg(theme.accent),
            ));
        }
    }

    lines
}

fn push_links(lines: &mut Vec<Line<'static>>, title: &str, links: &[Link], theme: &Theme) {
    if links.is_empty() {
        return;
    }
    lines.push(Line::default());
    lines.push(Line::styled(title.to_string(), theme.heading()));
    for link in links {
        let label = if link.label.is_empty() {
            link.url.clone()
        } else {
            link.label.clone()
        };
        let mut spans = vec![
            Span::styled("  • ", theme.dim()),
            Span::styled(label, Style::default().fg(theme.accent)),
        ];
        if !link.url.is_empty() && !link.label.is_empty() {
            spans.push(Span::styled(format!(" <{}>", link.url), theme.dim()));
        }
        lines.push(Line::from(spans));
    }
}

/// Rows `lines` occupy when wrapped to `width` columns.
///
/// Counts by display width, so word wrapping may take a row more.
pub fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    rows.min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(text: &str, questions: usize) -> Card {
        Card {
            id: Some("c1".to_string()),
            rating: 72.0,
            text: text.to_string(),
            created_at: None,
            citations: vec![Link {
                label: "Report".to_string(),
                url: "https://example.org/r".to_string(),
            }],
            recommendations: Vec::new(),
            suggested_questions: (0..questions).map(|i| format!("Question {}", i)).collect(),
        }
    }

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_badge_and_sections() {
        let theme = Theme::default();
        let lines = plain(&card_lines(&card("short", 0), CardView::default(), &theme));
        assert_eq!(lines[0], " 72   Analysis Score");
        assert!(lines.contains(&"Analysis".to_string()));
        assert!(lines.contains(&"Sources & Citations".to_string()));
        assert!(!lines.contains(&"Recommended Products".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Read More")));
    }

    #[test]
    fn test_long_text_offers_read_more() {
        let theme = Theme::default();
        let long = "x".repeat(250);
        let lines = plain(&card_lines(&card(&long, 0), CardView::default(), &theme));
        assert!(lines.iter().any(|l| l.ends_with("... Read More")));

        let view = CardView {
            expanded: true,
            show_all_questions: false,
        };
        let lines = plain(&card_lines(&card(&long, 0), view, &theme));
        assert!(lines.iter().any(|l| l.ends_with(" Show Less")));
    }

    #[test]
    fn test_questions_limited_until_shown() {
        let theme = Theme::default();
        let lines = plain(&card_lines(&card("t", 5), CardView::default(), &theme));
        let questions = lines.iter().filter(|l| l.starts_with("  › ")).count();
        assert_eq!(questions, 3);
        assert!(lines.contains(&"  Show 2 More Questions".to_string()));

        let lines = plain(&card_lines(
            &card("t", 5),
            CardView::COLLAPSED.toggled(),
            &theme,
        ));
        let questions = lines.iter().filter(|l| l.starts_with("  › ")).count();
        assert_eq!(questions, 5);
    }

    #[test]
    fn test_toggled_flips_both() {
        let open = CardView::COLLAPSED.toggled();
        assert!(open.expanded && open.show_all_questions);
        assert_eq!(open.toggled(), CardView::COLLAPSED);
    }

    #[test]
    fn test_wrapped_height() {
        let lines = vec![Line::from("a".repeat(25)), Line::default()];
        assert_eq!(wrapped_height(&lines, 10), 4);
        assert_eq!(wrapped_height(&lines, 0), 26);
    }
}
