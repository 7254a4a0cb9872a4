//! Scoped registration of global event listeners.
//!
//! The host routes an input to the controller only while a listener of the
//! matching kind is registered. Mount-scoped listeners live until teardown;
//! drag-scoped listeners live between drag start and drag end.

/// Kind of global event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Terminal/viewport size changes
    ViewportResize,
    /// Key presses (panel shortcut)
    KeyDown,
    /// Pointer movement while dragging the panel edge
    PointerMove,
    /// Pointer release ending a drag
    PointerUp,
}

/// Lifetime a listener is tied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// From mount until unmount
    Mount,
    /// From drag start until drag end
    Drag,
}

/// Handle of one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy)]
struct Registration {
    id: ListenerId,
    kind: ListenerKind,
    scope: ListenerScope,
}

/// Active listeners in registration order.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    active: Vec<Registration>,
    next_id: u64,
    registered_total: u64,
    released_total: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    ///
    /// Returns `None` when a listener of that kind is already active, so a
    /// second mount or a repeated drag start never double-subscribes.
    pub fn register(&mut self, kind: ListenerKind, scope: ListenerScope) -> Option<ListenerId> {
        if self.is_active(kind) {
            log::debug!("listener {:?} already registered", kind);
            return None;
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.registered_total += 1;
        self.active.push(Registration { id, kind, scope });
        Some(id)
    }

    /// Release one listener. Releasing twice is a no-op that returns false.
    pub fn release(&mut self, id: ListenerId) -> bool {
        match self.active.iter().position(|r| r.id == id) {
            Some(index) => {
                self.active.remove(index);
                self.released_total += 1;
                true
            }
            None => false,
        }
    }

    /// Release every listener of `scope`, newest first.
    pub fn release_scope(&mut self, scope: ListenerScope) -> Vec<ListenerKind> {
        let mut released = Vec::new();
        while let Some(index) = self.active.iter().rposition(|r| r.scope == scope) {
            released.push(self.active.remove(index).kind);
            self.released_total += 1;
        }
        released
    }

    /// Release every listener, newest first.
    pub fn release_all(&mut self) -> Vec<ListenerKind> {
        let mut released = Vec::with_capacity(self.active.len());
        while let Some(registration) = self.active.pop() {
            released.push(registration.kind);
            self.released_total += 1;
        }
        released
    }

    pub fn is_active(&self, kind: ListenerKind) -> bool {
        self.active.iter().any(|r| r.kind == kind)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Registrations minus releases over the registry's lifetime.
    ///
    /// Always equals `active_count()`; a mismatch means a leak.
    pub fn outstanding(&self) -> u64 {
        self.registered_total - self.released_total
    }
}
