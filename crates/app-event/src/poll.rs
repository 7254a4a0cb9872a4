//! Terminal event polling.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};

/// Application event
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize event (columns, rows)
    Resize(u16, u16),
    /// Tick event (timers and background results)
    Tick,
}

impl From<CrosstermEvent> for Event {
    fn from(event: CrosstermEvent) -> Self {
        match event {
            // With kitty keyboard protocol, we receive Press, Release, and Repeat events.
            // Only handle Press events to avoid duplicate actions.
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            _ => Event::Tick,
        }
    }
}

/// Event handler for polling terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Wait for next event, returning a tick no later than `deadline`.
    ///
    /// Lets a pending panel transition fire on time even when the tick
    /// rate is longer than the transition delay.
    pub fn next_before(&self, deadline: Option<Instant>) -> Result<Event> {
        let timeout = Self::timeout_for(self.tick_rate, deadline, Instant::now());
        if event::poll(timeout)? {
            Ok(Event::from(event::read()?))
        } else {
            Ok(Event::Tick)
        }
    }

    fn timeout_for(tick_rate: Duration, deadline: Option<Instant>, now: Instant) -> Duration {
        match deadline {
            Some(deadline) => tick_rate.min(deadline.saturating_duration_since(now)),
            None => tick_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_timeout_shrinks_to_deadline() {
        let now = Instant::now();
        let tick = Duration::from_millis(100);
        assert_eq!(EventHandler::timeout_for(tick, None, now), tick);
        assert_eq!(
            EventHandler::timeout_for(tick, Some(now + Duration::from_millis(20)), now),
            Duration::from_millis(20)
        );
        assert_eq!(
            EventHandler::timeout_for(tick, Some(now), now + Duration::from_millis(5)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_key_release_becomes_tick() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(matches!(
            Event::from(CrosstermEvent::Key(release)),
            Event::Tick
        ));
        assert!(matches!(
            Event::from(CrosstermEvent::Resize(80, 24)),
            Event::Resize(80, 24)
        ));
    }
}
