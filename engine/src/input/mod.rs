//! Input Module
//!
//! Provides platform-agnostic input handling for keyboard and mouse.
//! This module is decoupled from any specific windowing system (like winit)
//! to allow for flexible integration.
//!
//! # Example
//!
//! ```rust,ignore
//! use orbit_rig_engine::input::{InputState, KeyBindings, KeyCode, MouseButton};
//!
//! let bindings = KeyBindings::default();
//! let mut input = InputState::new();
//!
//! // Feed window events
//! input.keyboard.handle_key(KeyCode::W, true);
//! input.mouse.set_button(MouseButton::Right, true);
//! input.mouse.add_motion(12.0, -3.0);
//!
//! // Sample once per frame, then clear the per-frame edges
//! let camera = bindings.camera_input(&input);
//! let movement = bindings.movement_input(&input);
//! input.end_frame();
//! ```

pub mod bindings;
pub mod keyboard;
pub mod mouse;
pub mod source;

// Re-export commonly used types at module level
pub use bindings::{InputAction, KeyBindings, PointerBindings};
pub use keyboard::{KeyCode, KeyboardState};
pub use mouse::{MouseButton, MouseState, ScrollDelta};
pub use source::InputSource;

use glam::Vec2;

/// Combined input state for both keyboard and mouse.
///
/// This provides a convenient way to track all input state in a single struct.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl InputState {
    /// Create a new input state with all inputs in their default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame motion, scroll and press edges.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
    }

    /// Reset all input state to defaults.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.mouse.reset();
    }
}

impl InputSource for InputState {
    fn pointer_delta(&self) -> Vec2 {
        self.mouse.motion
    }

    fn scroll_delta(&self) -> f32 {
        self.mouse.scroll.y
    }

    fn key_held(&self, key: KeyCode) -> bool {
        self.keyboard.is_held(key)
    }

    fn key_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.was_pressed(key)
    }

    fn button_held(&self, button: MouseButton) -> bool {
        self.mouse.is_held(button)
    }
}
