//! Cancellable deferred transitions.
//!
//! The controller keeps at most one pending continuation. Scheduling a
//! new one supersedes the old one, and teardown cancels whatever is left.
//! Time is passed in explicitly so the event loop and tests drive it.

use std::time::{Duration, Instant};

/// State update applied when a deferred transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Second half of expand: `collapsed = false`
    Uncollapse,
    /// Second half of collapse: `open = false`
    Close,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Instant,
    continuation: Continuation,
}

/// Single-slot scheduler for panel transitions.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Option<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `continuation` to fire `delay` after `now`.
    ///
    /// Any continuation still pending is cancelled first.
    pub fn schedule(&mut self, now: Instant, delay: Duration, continuation: Continuation) {
        if let Some(previous) = self.pending.take() {
            log::debug!(
                "superseding pending {:?} due in {:?}",
                previous.continuation,
                previous.due.saturating_duration_since(now)
            );
        }
        self.pending = Some(Pending {
            due: now + delay,
            continuation,
        });
    }

    /// Cancel the pending continuation, if any.
    pub fn cancel(&mut self) -> Option<Continuation> {
        self.pending.take().map(|p| p.continuation)
    }

    /// Remove and return the pending continuation if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<Continuation> {
        match self.pending {
            Some(p) if p.due <= now => {
                self.pending = None;
                Some(p.continuation)
            }
            _ => None,
        }
    }

    /// Continuation waiting to fire.
    pub fn pending(&self) -> Option<Continuation> {
        self.pending.map(|p| p.continuation)
    }

    /// When the pending continuation is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}
