//! Side panel interaction controller for truecost.
//!
//! This crate provides:
//! - `PanelController` - open/collapse/resize state machine of the General Talk panel
//! - `PanelGeometry` - breakpoint and width rules
//! - `PanelLayout` - widths handed to the renderer
//! - `ListenerRegistry` - scoped registration of global event listeners
//! - `Scheduler` - cancellable deferred transitions
//!
//! # State machine
//!
//! ```text
//!            expand (open now)              +20ms
//!   Closed ──────────────────▶ Expanding ──────────▶ Open
//!     ▲                                               │
//!     │         +240ms                 collapse       │
//!     └──────────────────── Collapsing ◀──────────────┘
//!
//!   Ctrl+Q flips open and collapsed together (Closed ⇄ Open, no staging)
//! ```
//!
//! `resizing` is an orthogonal sub-state, only possible while the panel is
//! expanded in desktop mode.

pub mod controller;
pub mod geometry;
pub mod layout;
pub mod listeners;
pub mod state;
pub mod timer;

pub use controller::{PanelController, TransitionPhase, TransitionTiming};
pub use geometry::{CellMetrics, PanelGeometry, ViewportMode};
pub use layout::PanelLayout;
pub use listeners::{ListenerId, ListenerKind, ListenerRegistry, ListenerScope};
pub use state::{PanelPhase, PanelState};
pub use timer::{Continuation, Scheduler};
