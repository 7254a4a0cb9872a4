//! Event handling and hotkey processing for truecost.
//!
//! This crate provides:
//! - `EventHandler` - polling for terminal events
//! - `HotkeyProcessor` trait and `KeyBinding` for global shortcuts
//! - `PointerRouter` - turning mouse events into panel gestures
//!
//! # Architecture
//!
//! ```text
//! crossterm ─▶ EventHandler ─▶ Event ─┬─▶ HotkeyProcessor ─▶ HotkeyAction
//!                                     └─▶ PointerRouter   ─▶ PointerAction
//!                                                   │
//!                                                   ▼
//!                                          App orchestrator
//! ```

mod poll;
mod pointer;

pub use poll::{Event, EventHandler};
pub use pointer::{HitRegions, PointerAction, PointerRouter};

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ============================================================================
// Key Binding Types
// ============================================================================

/// A key combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// The key code (e.g., Char('q'), Tab)
    pub code: KeyCode,
    /// Required modifiers (e.g., ALT, CONTROL)
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create an Alt+key binding.
    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    /// Create a Ctrl+key binding.
    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    /// Create a key binding without modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Check if a key event matches this binding.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        Self::from(*key) == *self
    }
}

impl From<KeyEvent> for KeyBinding {
    /// Letters are compared case-insensitively and Shift is ignored,
    /// so Ctrl+Q and Ctrl+Shift+Q are the same binding.
    fn from(event: KeyEvent) -> Self {
        let code = match event.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        Self {
            code,
            modifiers: event.modifiers - KeyModifiers::SHIFT,
        }
    }
}

// ============================================================================
// Hotkey Action Enum
// ============================================================================

/// Actions that can be triggered by hotkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Flip the General Talk panel without staging
    TogglePanelShortcut,
    /// Staged expand/collapse, same as the toggle button
    TogglePanel,
    /// Move keyboard focus between the query box and the side chat
    SwitchFocus,
    /// Switch between the query view and the dashboard
    ToggleDashboard,
    /// Expand or shrink the newest card's text and questions
    ToggleCardDetails,
    /// End the session
    Logout,
    /// Quit the application
    Quit,
}

// ============================================================================
// Hotkey Processor Trait
// ============================================================================

/// Trait for processing global hotkeys.
///
/// Implementations check if a key event is a global hotkey and
/// return the corresponding action if so.
pub trait HotkeyProcessor {
    /// Returns the action if the key matches a hotkey binding,
    /// or None if it should be passed to the focused input.
    fn process_hotkey(&self, key: &KeyEvent) -> Option<HotkeyAction>;
}

// ============================================================================
// Default Hotkey Processor
// ============================================================================

/// Default hotkey processor with standard key bindings.
#[derive(Debug, Clone)]
pub struct DefaultHotkeyProcessor {
    bindings: HashMap<KeyBinding, HotkeyAction>,
}

impl Default for DefaultHotkeyProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultHotkeyProcessor {
    /// Create a new processor with default bindings.
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Side panel
        bindings.insert(
            KeyBinding::ctrl(KeyCode::Char('q')),
            HotkeyAction::TogglePanelShortcut,
        );
        bindings.insert(
            KeyBinding::alt(KeyCode::Char('g')),
            HotkeyAction::TogglePanel,
        );

        // Focus and views
        bindings.insert(KeyBinding::plain(KeyCode::Tab), HotkeyAction::SwitchFocus);
        bindings.insert(
            KeyBinding::alt(KeyCode::Char('d')),
            HotkeyAction::ToggleDashboard,
        );
        bindings.insert(
            KeyBinding::alt(KeyCode::Char('e')),
            HotkeyAction::ToggleCardDetails,
        );

        // Session
        bindings.insert(KeyBinding::alt(KeyCode::Char('l')), HotkeyAction::Logout);

        // Quit
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), HotkeyAction::Quit);
        bindings.insert(KeyBinding::alt(KeyCode::Char('x')), HotkeyAction::Quit);

        Self { bindings }
    }

    /// Add or replace a hotkey binding.
    pub fn bind(&mut self, key: KeyBinding, action: HotkeyAction) {
        self.bindings.insert(key, action);
    }

    /// Remove a hotkey binding.
    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    /// Get all current bindings.
    pub fn bindings(&self) -> &HashMap<KeyBinding, HotkeyAction> {
        &self.bindings
    }
}

impl HotkeyProcessor for DefaultHotkeyProcessor {
    fn process_hotkey(&self, key: &KeyEvent) -> Option<HotkeyAction> {
        self.bindings.get(&KeyBinding::from(*key)).copied()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn ctrl_key(c: char) -> KeyEvent {
        key_event(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_key_binding_matches() {
        let binding = KeyBinding::ctrl(KeyCode::Char('q'));
        assert!(binding.matches(&ctrl_key('q')));
        assert!(binding.matches(&ctrl_key('Q')));
        assert!(!binding.matches(&ctrl_key('w')));
        assert!(!binding.matches(&key_event(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_ctrl_q_is_panel_shortcut() {
        let processor = DefaultHotkeyProcessor::new();
        assert_eq!(
            processor.process_hotkey(&ctrl_key('q')),
            Some(HotkeyAction::TogglePanelShortcut)
        );
        assert_eq!(
            processor.process_hotkey(&key_event(
                KeyCode::Char('Q'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            )),
            Some(HotkeyAction::TogglePanelShortcut)
        );
    }

    #[test]
    fn test_plain_letters_pass_through() {
        let processor = DefaultHotkeyProcessor::new();
        assert_eq!(
            processor.process_hotkey(&key_event(KeyCode::Char('q'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            processor.process_hotkey(&key_event(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            None
        );
    }

    #[test]
    fn test_tab_switches_focus() {
        let processor = DefaultHotkeyProcessor::new();
        assert_eq!(
            processor.process_hotkey(&key_event(KeyCode::Tab, KeyModifiers::NONE)),
            Some(HotkeyAction::SwitchFocus)
        );
    }

    #[test]
    fn test_quit_bindings() {
        let processor = DefaultHotkeyProcessor::new();
        assert_eq!(
            processor.process_hotkey(&ctrl_key('c')),
            Some(HotkeyAction::Quit)
        );
        assert_eq!(
            processor.process_hotkey(&key_event(KeyCode::Char('x'), KeyModifiers::ALT)),
            Some(HotkeyAction::Quit)
        );
    }

    #[test]
    fn test_bind_and_unbind() {
        let mut processor = DefaultHotkeyProcessor::new();
        let binding = KeyBinding::alt(KeyCode::Char('t'));
        processor.bind(binding.clone(), HotkeyAction::TogglePanel);
        assert_eq!(
            processor.process_hotkey(&key_event(KeyCode::Char('t'), KeyModifiers::ALT)),
            Some(HotkeyAction::TogglePanel)
        );

        processor.unbind(&binding);
        assert_eq!(
            processor.process_hotkey(&key_event(KeyCode::Char('t'), KeyModifiers::ALT)),
            None
        );
    }
}
