//! Device-agnostic view of one frame's input.

use glam::Vec2;

use super::keyboard::KeyCode;
use super::mouse::MouseButton;

/// Anything that can answer per-frame input queries.
///
/// The windowing layer (or a scripted test) implements this; bindings sample
/// it into camera and movement input once per frame.
pub trait InputSource {
    /// Pointer motion accumulated this frame (+x right, +y down).
    fn pointer_delta(&self) -> Vec2;

    /// Vertical wheel motion this frame, positive away from the user.
    fn scroll_delta(&self) -> f32;

    /// Whether `key` is down.
    fn key_held(&self, key: KeyCode) -> bool;

    /// Whether `key` went down this frame.
    fn key_pressed(&self, key: KeyCode) -> bool;

    /// Whether `button` is down.
    fn button_held(&self, button: MouseButton) -> bool;
}
