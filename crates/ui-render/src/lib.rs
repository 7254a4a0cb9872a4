//! UI rendering components for truecost.
//!
//! Each view takes a params struct borrowed from the app state and draws
//! into a ratatui `Buffer`. Views with clickable parts return their areas
//! so the app can route mouse events against the last frame.

pub mod card;
pub mod dashboard;
pub mod input;
pub mod main_view;
pub mod side_panel;
pub mod status_bar;
pub mod theme;

pub use card::{card_lines, wrapped_height, CardView};
pub use dashboard::{render_dashboard, DashboardParams};
pub use input::{render_input, InputParams};
pub use main_view::{render_main_view, MainViewParams};
pub use side_panel::{render_side_panel, render_toggle_button, SidePanelParams, SidePanelRegions};
pub use status_bar::{StatusBar, StatusBarParams};
pub use theme::Theme;
