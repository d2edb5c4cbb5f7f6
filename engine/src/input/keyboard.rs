//! Keyboard Input Module
//!
//! Contains keyboard state tracking with per-frame press edges.
//! Decoupled from winit to use generic key codes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Key identifiers the rig understands, independent of windowing system.
///
/// Hosts translate their own key events into these; anything else arrives
/// as [`KeyCode::Unknown`] and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    // Letters
    A,
    D,
    E,
    F,
    Q,
    R,
    S,
    T,
    V,
    W,

    // Digits
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Cursor block: default turn and pitch keys
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,

    // Keypad: autorun and zoom
    NumLock,
    NumpadAdd,
    NumpadSubtract,
    NumpadEnter,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    // Editing and punctuation
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Slash,
    Minus,
    Equal,

    /// Anything the host could not map
    Unknown,
}

/// Held keys plus this frame's press edges.
///
/// `held` is the level state; `pressed` holds keys that went down since the
/// last [`end_frame`](Self::end_frame), so a tap shorter than a frame is
/// still seen once.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Key repeat (a press while already held) does not produce a new edge.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        if pressed {
            if self.held.insert(key) {
                self.pressed.insert(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Whether `key` is currently down.
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether `key` went down this frame.
    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    /// Forget this frame's press edges. Call once per frame after sampling.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Release every key.
    pub fn reset(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_default() {
        let keys = KeyboardState::new();
        assert!(!keys.any_held());
        assert!(!keys.is_held(KeyCode::W));
    }

    #[test]
    fn test_press_edge_lasts_one_frame() {
        let mut keys = KeyboardState::new();
        keys.handle_key(KeyCode::Space, true);
        assert!(keys.is_held(KeyCode::Space));
        assert!(keys.was_pressed(KeyCode::Space));

        keys.end_frame();
        assert!(keys.is_held(KeyCode::Space));
        assert!(!keys.was_pressed(KeyCode::Space));
    }

    #[test]
    fn test_key_repeat_is_not_a_new_press() {
        let mut keys = KeyboardState::new();
        keys.handle_key(KeyCode::NumLock, true);
        keys.end_frame();
        keys.handle_key(KeyCode::NumLock, true);
        assert!(!keys.was_pressed(KeyCode::NumLock));
    }

    #[test]
    fn test_tap_within_frame_is_seen() {
        let mut keys = KeyboardState::new();
        keys.handle_key(KeyCode::Space, true);
        keys.handle_key(KeyCode::Space, false);
        assert!(!keys.is_held(KeyCode::Space));
        assert!(keys.was_pressed(KeyCode::Space));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut keys = KeyboardState::new();
        keys.handle_key(KeyCode::Unknown, true);
        assert!(!keys.any_held());
    }
}
