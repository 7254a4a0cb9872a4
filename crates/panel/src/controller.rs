//! Open/collapse/resize controller for the General Talk side panel.
//!
//! Expand and collapse are staged: the first half applies immediately and
//! the second half is a cancellable continuation fired by [`PanelController::tick`].
//! The keyboard shortcut flips `open` and `collapsed` together with no
//! staging.

use std::time::{Duration, Instant};

use truecost_config::PanelSettings;

use crate::geometry::{PanelGeometry, ViewportMode};
use crate::layout::PanelLayout;
use crate::listeners::{ListenerKind, ListenerRegistry, ListenerScope};
use crate::state::{PanelPhase, PanelState};
use crate::timer::{Continuation, Scheduler};

/// Delays of the staged transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    /// Expand: open now, un-collapse after this
    pub expand_delay: Duration,
    /// Collapse: collapse now, close after this
    pub collapse_delay: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self::from_settings(&PanelSettings::default())
    }
}

impl TransitionTiming {
    pub fn from_settings(settings: &PanelSettings) -> Self {
        Self {
            expand_delay: Duration::from_millis(settings.expand_delay_ms),
            collapse_delay: Duration::from_millis(settings.collapse_delay_ms),
        }
    }
}

/// Phase including the direction of a pending transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Closed,
    Expanding,
    Open,
    /// Collapsed, waiting to be removed from layout
    Collapsing,
}

/// Side panel interaction controller.
#[derive(Debug)]
pub struct PanelController {
    geometry: PanelGeometry,
    timing: TransitionTiming,
    state: PanelState,
    viewport_width: u32,
    scheduler: Scheduler,
    listeners: ListenerRegistry,
    mounted: bool,
}

impl PanelController {
    /// Create an unmounted controller.
    pub fn new(geometry: PanelGeometry, timing: TransitionTiming) -> Self {
        Self {
            geometry,
            timing,
            state: PanelState::initial(geometry.min_width),
            viewport_width: 0,
            scheduler: Scheduler::new(),
            listeners: ListenerRegistry::new(),
            mounted: false,
        }
    }

    /// Create an unmounted controller from config settings.
    pub fn from_settings(settings: &PanelSettings) -> Self {
        Self::new(
            PanelGeometry::from_settings(settings),
            TransitionTiming::from_settings(settings),
        )
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Mount the panel in a viewport `viewport_width` pixels wide.
    ///
    /// Registers the viewport and keyboard listeners, resets the state to
    /// closed and runs the viewport rule once. Mounting twice is ignored.
    pub fn mount(&mut self, viewport_width: u32) {
        if self.mounted {
            log::warn!("panel controller already mounted");
            return;
        }
        self.listeners
            .register(ListenerKind::ViewportResize, ListenerScope::Mount);
        self.listeners
            .register(ListenerKind::KeyDown, ListenerScope::Mount);
        self.mounted = true;
        self.state = PanelState::initial(self.state.width);
        self.on_viewport_resize(viewport_width);
        log::debug!(
            "panel mounted: viewport {}px, {:?}, width {}px",
            viewport_width,
            self.state.viewport_mode,
            self.state.width
        );
    }

    /// Tear the panel down.
    ///
    /// Cancels any pending continuation and releases every listener in
    /// reverse registration order. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if let Some(dropped) = self.scheduler.cancel() {
            log::debug!("discarding pending {:?} on unmount", dropped);
        }
        self.state.resizing = false;
        let released = self.listeners.release_all();
        log::debug!("panel unmounted, released {:?}", released);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // ========================================================================
    // Open / collapse transitions
    // ========================================================================

    /// Open the panel now and un-collapse it after the expand delay.
    pub fn expand(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        self.scheduler.cancel();
        self.state.open = true;
        if self.state.collapsed {
            self.scheduler
                .schedule(now, self.timing.expand_delay, Continuation::Uncollapse);
        }
    }

    /// Collapse the panel now and remove it from layout after the collapse delay.
    pub fn collapse(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        self.scheduler.cancel();
        self.end_drag();
        self.state.collapsed = true;
        if self.state.open {
            self.scheduler
                .schedule(now, self.timing.collapse_delay, Continuation::Close);
        }
    }

    /// Toggle button: expand when collapsed, collapse otherwise.
    pub fn toggle(&mut self, now: Instant) {
        if self.state.collapsed {
            self.expand(now);
        } else {
            self.collapse(now);
        }
    }

    /// Keyboard shortcut: flip `open` and `collapsed` at once.
    ///
    /// Unlike [`expand`](Self::expand) and [`collapse`](Self::collapse) this
    /// has no staging. A pending staged continuation is cancelled first.
    pub fn toggle_via_shortcut(&mut self) {
        if !self.mounted {
            return;
        }
        self.scheduler.cancel();
        self.state.open = !self.state.open;
        self.state.collapsed = !self.state.collapsed;
        if self.state.collapsed {
            self.end_drag();
        }
    }

    /// Apply the pending continuation if it is due. Returns true if state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        match self.scheduler.take_due(now) {
            Some(Continuation::Uncollapse) => {
                self.state.collapsed = false;
                true
            }
            Some(Continuation::Close) => {
                self.state.open = false;
                true
            }
            None => false,
        }
    }

    /// When the next continuation is due, for sizing the event poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    // ========================================================================
    // Viewport and drag
    // ========================================================================

    /// Recompute mode and width for a new viewport width.
    pub fn on_viewport_resize(&mut self, viewport_width: u32) {
        self.viewport_width = viewport_width;
        let (mode, width) = self.geometry.width_for_viewport(viewport_width);
        self.state.viewport_mode = mode;
        self.state.width = width;
        if mode == ViewportMode::Mobile {
            self.end_drag();
        }
    }

    /// Start a drag-resize. Ignored on mobile or while collapsed.
    pub fn on_drag_start(&mut self) {
        if !self.mounted
            || self.state.viewport_mode != ViewportMode::Desktop
            || self.state.collapsed
            || self.state.resizing
        {
            return;
        }
        self.listeners
            .register(ListenerKind::PointerMove, ListenerScope::Drag);
        self.listeners
            .register(ListenerKind::PointerUp, ListenerScope::Drag);
        self.state.resizing = true;
    }

    /// Resize so the panel's left edge follows `pointer_x`.
    pub fn on_drag_move(&mut self, pointer_x: u32) {
        if !self.state.resizing || self.state.viewport_mode != ViewportMode::Desktop {
            return;
        }
        self.state.width = self
            .geometry
            .width_for_pointer(self.viewport_width, pointer_x);
    }

    /// End the drag. Always clears `resizing`.
    pub fn on_drag_end(&mut self) {
        self.end_drag();
    }

    fn end_drag(&mut self) {
        self.state.resizing = false;
        self.listeners.release_scope(ListenerScope::Drag);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// Phase including the direction of a pending transition.
    pub fn phase(&self) -> TransitionPhase {
        match (self.state.phase(), self.scheduler.pending()) {
            (PanelPhase::Closed, _) => TransitionPhase::Closed,
            (PanelPhase::Open, _) => TransitionPhase::Open,
            (PanelPhase::Expanding, Some(Continuation::Close)) => TransitionPhase::Collapsing,
            (PanelPhase::Expanding, _) => TransitionPhase::Expanding,
        }
    }

    /// Whether events of `kind` should be routed to this controller.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.is_active(kind)
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Layout for the current state and viewport.
    pub fn layout(&self) -> PanelLayout {
        PanelLayout::compute(&self.state, self.viewport_width)
    }
}

impl Drop for PanelController {
    fn drop(&mut self) {
        self.unmount();
    }
}
