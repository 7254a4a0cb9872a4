use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Clear},
    Frame,
};

use truecost_app::truecost_app_event::HitRegions;
use truecost_app::truecost_panel::{PanelController, TransitionPhase, ViewportMode};
use truecost_app::truecost_ui_render::{
    render_dashboard, render_main_view, render_side_panel, render_toggle_button, DashboardParams,
    MainViewParams, SidePanelParams, StatusBar, StatusBarParams,
};
use truecost_app::truecost_talk::DashboardStats;
use truecost_app::{AppState, Focus, View};

/// Render one frame and record its clickable areas in `state`.
pub fn render_frame(frame: &mut Frame, state: &mut AppState, panel: &PanelController) {
    let size = frame.area();

    // Set application background
    let background = Block::default().style(Style::default().bg(state.theme.bg));
    frame.render_widget(background, size);

    // Split screen into main area and status bar (1 line)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);
    let (content, status_area) = (chunks[0], chunks[1]);

    let layout = panel.layout();
    let panel_cols = state
        .cells
        .px_to_cols(layout.panel_width)
        .min(content.width);

    // Desktop panel sits beside the content, mobile panel overlays it
    let main_area = if layout.overlay {
        content
    } else {
        Rect {
            width: content.width - panel_cols,
            ..content
        }
    };
    let panel_area = (panel_cols > 0).then(|| Rect {
        x: content.right() - panel_cols,
        width: panel_cols,
        ..content
    });

    let main_cursor = render_main(frame, state, main_area);

    let mut regions = HitRegions::default();
    let mut talk_cursor = None;
    if let Some(area) = panel_area {
        frame.render_widget(Clear, area);
        let side = render_side_panel(
            area,
            frame.buffer_mut(),
            &SidePanelParams {
                theme: &state.theme,
                messages: state.chat.messages(),
                input: &state.talk_input,
                focused: state.focus == Focus::Talk,
                waiting: state.chat.is_waiting(),
                scroll_back: state.talk_scroll_back,
                resizing: panel.state().resizing,
                resizable: panel.state().viewport_mode == ViewportMode::Desktop,
            },
        );
        regions.panel = Some(area);
        regions.close_button = side.close_button;
        regions.resize_handle = side.resize_handle;
        talk_cursor = side.cursor;
    }

    if layout.toggle_visible {
        let offset = state.cells.px_to_cols(layout.toggle_offset);
        regions.toggle_button = render_toggle_button(
            content,
            frame.buffer_mut(),
            offset,
            panel.state().collapsed,
            &state.theme,
        );
    }

    let cursor = match state.focus {
        Focus::Query => main_cursor,
        Focus::Talk => talk_cursor,
    };
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
    state.cursor = cursor;
    state.hit_regions = regions;

    let panel_label = panel_label(panel);
    let alert = state.log_alert_text();
    StatusBar::render(
        frame.buffer_mut(),
        status_area,
        &StatusBarParams {
            theme: &state.theme,
            status_message: state.status_message.as_ref(),
            alert: alert.as_deref(),
            user: state.username(),
            panel_label: &panel_label,
        },
    );
}

/// Query view or dashboard; returns the query box cursor.
fn render_main(
    frame: &mut Frame,
    state: &AppState,
    area: Rect,
) -> Option<ratatui::layout::Position> {
    match state.view {
        View::Query => render_main_view(
            area,
            frame.buffer_mut(),
            &MainViewParams {
                theme: &state.theme,
                input: &state.query_input,
                input_focused: state.focus == Focus::Query,
                loading: state.main_loading,
                outcome: state.outcome.as_ref(),
                recent: state.recent.cards(),
                recent_loading: state.session_loading,
                card_view: state.card_view,
                scroll: state.main_scroll,
            },
        ),
        View::Dashboard => {
            render_dashboard(
                area,
                frame.buffer_mut(),
                &DashboardParams {
                    theme: &state.theme,
                    username: state.username(),
                    stats: DashboardStats::from_cards(&state.all_cards),
                    cards: &state.all_cards,
                    scroll: state.dashboard_scroll,
                },
            );
            None
        }
    }
}

fn panel_label(panel: &PanelController) -> String {
    let state = panel.state();
    let mode = match state.viewport_mode {
        ViewportMode::Desktop => "desktop",
        ViewportMode::Mobile => "mobile",
    };
    let phase = match panel.phase() {
        TransitionPhase::Closed => "closed",
        TransitionPhase::Expanding => "expanding",
        TransitionPhase::Open => "open",
        TransitionPhase::Collapsing => "collapsing",
    };
    let resizing = if state.resizing { " resizing" } else { "" };
    format!("talk {} {}px {}{}", phase, state.width, mode, resizing)
}
