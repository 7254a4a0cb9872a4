//! General Talk side panel and its toggle button.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use truecost_talk::ChatMessage;

use crate::card::wrapped_height;
use crate::input::{render_input, InputParams};
use crate::theme::Theme;

pub const PANEL_TITLE: &str = "General Talk";
pub const WELCOME: &str = "Welcome to the General Talk section! You can use this space to chat, ask questions, or discuss anything related to climate change.";
pub const TALK_PLACEHOLDER: &str = "Type a message...";
const CLOSE_LABEL: &str = "[×]";
const TOGGLE_WIDTH: u16 = 3;

/// Side panel rendering parameters.
pub struct SidePanelParams<'a> {
    pub theme: &'a Theme,
    pub messages: &'a [ChatMessage],
    pub input: &'a str,
    pub focused: bool,
    /// Reply pending
    pub waiting: bool,
    /// Rows scrolled up from the newest message
    pub scroll_back: u16,
    /// Drag in progress (highlights the edge)
    pub resizing: bool,
    /// Edge can be dragged (desktop only)
    pub resizable: bool,
}

/// Interactive areas of a rendered panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidePanelRegions {
    pub close_button: Option<Rect>,
    pub resize_handle: Option<Rect>,
    pub cursor: Option<Position>,
}

/// Render the expanded panel into `area`.
pub fn render_side_panel(area: Rect, buf: &mut Buffer, params: &SidePanelParams<'_>) -> SidePanelRegions {
    let mut regions = SidePanelRegions::default();
    if area.width < 6 || area.height < 6 {
        return regions;
    }
    let theme = params.theme;

    let edge_style = if params.resizing {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.raised)
    };
    let title_style = if params.focused {
        Style::default().fg(theme.fg).add_modifier(Modifier::BOLD)
    } else {
        theme.text()
    };

    let block = Block::default()
        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
        .border_style(edge_style)
        .style(Style::default().bg(theme.surface))
        .title(Span::styled(format!(" {} ", PANEL_TITLE), title_style));
    let inner = block.inner(area);
    block.render(area, buf);

    // Close button in the top-right corner
    let close_width = CLOSE_LABEL.chars().count() as u16;
    let close = Rect::new(area.right() - close_width - 1, area.y, close_width, 1);
    buf.set_string(
        close.x,
        close.y,
        CLOSE_LABEL,
        Style::default().fg(theme.accent),
    );
    regions.close_button = Some(close);

    if params.resizable {
        regions.resize_handle = Some(Rect::new(area.x, area.y + 1, 1, area.height - 1));
    }

    if inner.height < 4 {
        return regions;
    }
    let messages_area = Rect::new(inner.x + 1, inner.y, inner.width - 1, inner.height - 3);
    let input_area = Rect::new(inner.x, inner.bottom() - 3, inner.width, 3);

    let lines = message_lines(params);
    let total = wrapped_height(&lines, messages_area.width);
    let bottom = total.saturating_sub(messages_area.height);
    let scroll = bottom.saturating_sub(params.scroll_back);
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .render(messages_area, buf);

    regions.cursor = render_input(
        input_area,
        buf,
        &InputParams {
            theme,
            text: params.input,
            placeholder: TALK_PLACEHOLDER,
            focused: params.focused,
            busy: params.waiting,
        },
    );
    regions
}

fn message_lines(params: &SidePanelParams<'_>) -> Vec<Line<'static>> {
    let theme = params.theme;
    let mut lines = vec![Line::styled(WELCOME, theme.dim()), Line::default()];
    for message in params.messages {
        lines.push(Line::styled(
            message.user.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        match &message.response {
            Some(response) => lines.push(Line::styled(
                format!(" {}", response),
                theme.text().bg(theme.raised),
            )),
            None => lines.push(Line::styled(" Loading...", theme.dim())),
        }
        lines.push(Line::default());
    }
    lines
}

/// Draw the expand/collapse button `right_offset` columns from the right
/// edge of `frame`, vertically centered. Returns its area.
pub fn render_toggle_button(
    frame: Rect,
    buf: &mut Buffer,
    right_offset: u16,
    collapsed: bool,
    theme: &Theme,
) -> Option<Rect> {
    let needed = right_offset.saturating_add(TOGGLE_WIDTH);
    if frame.height == 0 || needed > frame.width {
        return None;
    }
    let area = Rect::new(
        frame.right() - needed,
        frame.y + frame.height / 2,
        TOGGLE_WIDTH,
        1,
    );
    let glyph = if collapsed { "‹" } else { "›" };
    let border = Style::default().fg(theme.surface).bg(theme.bg);
    buf.set_line(
        area.x,
        area.y,
        &Line::from(vec![
            Span::styled("[", border),
            Span::styled(
                glyph,
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("]", border),
        ]),
        TOGGLE_WIDTH,
    );
    Some(area)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn params<'a>(theme: &'a Theme, messages: &'a [ChatMessage]) -> SidePanelParams<'a> {
        SidePanelParams {
            theme,
            messages,
            input: "",
            focused: false,
            waiting: false,
            scroll_back: 0,
            resizing: false,
            resizable: true,
        }
    }

    #[test]
    fn test_regions_follow_area() {
        let theme = Theme::default();
        let area = Rect::new(40, 0, 40, 20);
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 20));
        let regions = render_side_panel(area, &mut buf, &params(&theme, &[]));
        assert_eq!(regions.close_button, Some(Rect::new(76, 0, 3, 1)));
        assert_eq!(regions.resize_handle, Some(Rect::new(40, 1, 1, 19)));
        assert!(row(&buf, 0).contains(PANEL_TITLE));
    }

    #[test]
    fn test_mobile_panel_has_no_handle() {
        let theme = Theme::default();
        let area = Rect::new(4, 0, 36, 20);
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 20));
        let mut p = params(&theme, &[]);
        p.resizable = false;
        let regions = render_side_panel(area, &mut buf, &p);
        assert_eq!(regions.resize_handle, None);
    }

    #[test]
    fn test_pending_message_shows_loading() {
        let theme = Theme::default();
        let messages = vec![
            ChatMessage {
                user: "what is fast fashion".to_string(),
                response: Some("Cheap clothing made quickly.".to_string()),
            },
            ChatMessage {
                user: "and slow fashion".to_string(),
                response: None,
            },
        ];
        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        render_side_panel(area, &mut buf, &params(&theme, &messages));
        let text: String = (0..30).map(|y| row(&buf, y)).collect();
        assert!(text.contains("what is fast fashion"));
        assert!(text.contains("Cheap clothing made quickly."));
        assert!(text.contains("Loading..."));
    }

    #[test]
    fn test_toggle_button_position() {
        let theme = Theme::default();
        let frame = Rect::new(0, 0, 128, 30);
        let mut buf = Buffer::empty(frame);
        let area = render_toggle_button(frame, &mut buf, 2, true, &theme);
        assert_eq!(area, Some(Rect::new(123, 15, 3, 1)));
        assert_eq!(buf[(124, 15)].symbol(), "‹");

        assert_eq!(render_toggle_button(frame, &mut buf, 127, false, &theme), None);
    }
}
