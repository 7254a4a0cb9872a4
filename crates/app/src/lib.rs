//! Application orchestrator for truecost.
//!
//! This crate ties together the panel controller, the chat and card state
//! and the API workers, and provides:
//! - `App` struct - the main application and its event loop
//! - `AppState` - global application state read by the renderer
//! - `init_logging` - logger setup from config
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        truecost (bin)                            │
//! │  main.rs - entry point, terminal setup, frame composition        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    truecost-app (this crate)                     │
//! │  App, AppState, key/mouse routing, background tasks              │
//! └─────────────────────────────────────────────────────────────────┘
//!            │              │              │              │
//!            ▼              ▼              ▼              ▼
//!     ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐
//!     │app-event │  │  panel   │  │   talk   │  │ui-render │
//!     └──────────┘  └──────────┘  └──────────┘  └──────────┘
//! ```

pub mod app;
pub mod state;

pub use app::{init_logging, App, TaskResult};
pub use state::{AppState, Focus, TerminalSize, View};

// Re-export crates the binary composes frames with
pub use truecost_app_event;
pub use truecost_panel;
pub use truecost_talk;
pub use truecost_ui_render;
