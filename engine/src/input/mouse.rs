//! Mouse Input Module
//!
//! Per-frame pointer motion, wheel and button state.
//! Decoupled from winit to use generic types.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// One wheel event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollDelta {
    /// Horizontal scroll (positive = right)
    pub x: f32,
    /// Vertical scroll (positive = away from the user)
    pub y: f32,
}

impl ScrollDelta {
    /// Wheel notches.
    pub fn from_lines(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Trackpad pixels, at 100 px per notch.
    pub fn from_pixels(x: f64, y: f64) -> Self {
        Self::from_lines((x / 100.0) as f32, (y / 100.0) as f32)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Mouse state for the current frame.
///
/// Motion and scroll accumulate over every event of a frame. Buttons keep a
/// level state plus the set pressed since the last
/// [`end_frame`](Self::end_frame).
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Raw motion this frame (+x right, +y down)
    pub motion: Vec2,
    /// Wheel movement this frame
    pub scroll: ScrollDelta,
    held: HashSet<MouseButton>,
    pressed: HashSet<MouseButton>,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw motion event. Non-finite deltas are dropped.
    pub fn add_motion(&mut self, dx: f32, dy: f32) {
        let delta = Vec2::new(dx, dy);
        if delta.is_finite() {
            self.motion += delta;
        }
    }

    /// Add a wheel event. Non-finite deltas are dropped.
    pub fn add_scroll(&mut self, delta: ScrollDelta) {
        if delta.is_finite() {
            self.scroll.x += delta.x;
            self.scroll.y += delta.y;
        }
    }

    /// Handle a button press/release event.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            if self.held.insert(button) {
                self.pressed.insert(button);
            }
        } else {
            self.held.remove(&button);
        }
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    /// Whether `button` went down this frame.
    pub fn was_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(&button)
    }

    /// Clear per-frame motion, scroll and press edges (call after sampling).
    pub fn end_frame(&mut self) {
        self.motion = Vec2::ZERO;
        self.scroll = ScrollDelta::default();
        self.pressed.clear();
    }

    /// Release everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
