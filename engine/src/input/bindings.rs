//! Key Bindings Module
//!
//! Maps physical keys and pointer buttons to camera and movement actions and
//! samples an [`InputSource`] into per-frame [`CameraInput`] and
//! [`MovementInput`] snapshots.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::keyboard::KeyCode;
use super::mouse::MouseButton;
use super::source::InputSource;
use crate::camera::CameraInput;
use crate::player::MovementInput;

/// Actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAction {
    // Movement
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    ToggleAutorun,

    // Camera
    RotateLeft,
    RotateRight,
    PitchUp,
    PitchDown,
    ZoomIn,
    ZoomOut,
}

impl InputAction {
    /// Every bindable action.
    pub const ALL: [InputAction; 12] = [
        InputAction::MoveForward,
        InputAction::MoveBackward,
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::Jump,
        InputAction::ToggleAutorun,
        InputAction::RotateLeft,
        InputAction::RotateRight,
        InputAction::PitchUp,
        InputAction::PitchDown,
        InputAction::ZoomIn,
        InputAction::ZoomOut,
    ];

    /// Keys bound to this action out of the box.
    pub fn default_keys(self) -> Vec<KeyCode> {
        match self {
            InputAction::MoveForward => vec![KeyCode::W],
            InputAction::MoveBackward => vec![KeyCode::S],
            InputAction::MoveLeft => vec![KeyCode::A],
            InputAction::MoveRight => vec![KeyCode::D],
            InputAction::Jump => vec![KeyCode::Space],
            InputAction::ToggleAutorun => vec![KeyCode::NumLock],
            InputAction::RotateLeft => vec![KeyCode::ArrowLeft],
            InputAction::RotateRight => vec![KeyCode::ArrowRight],
            InputAction::PitchUp => vec![KeyCode::PageUp],
            InputAction::PitchDown => vec![KeyCode::PageDown],
            InputAction::ZoomIn => vec![KeyCode::NumpadAdd, KeyCode::Equal],
            InputAction::ZoomOut => vec![KeyCode::NumpadSubtract, KeyCode::Minus],
        }
    }
}

/// Pointer button roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerBindings {
    /// Orbits the camera and turns the character with it
    pub steer: MouseButton,
    /// Orbits the camera only
    pub orbit: MouseButton,
}

impl Default for PointerBindings {
    fn default() -> Self {
        Self {
            steer: MouseButton::Right,
            orbit: MouseButton::Left,
        }
    }
}

/// Key bindings configuration.
///
/// A key maps to at most one action; an action can have several keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    keys: BTreeMap<InputAction, Vec<KeyCode>>,
    pub pointer: PointerBindings,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = InputAction::ALL
            .iter()
            .map(|&action| (action, action.default_keys()))
            .collect();
        Self {
            keys,
            pointer: PointerBindings::default(),
        }
    }
}

impl KeyBindings {
    /// Create default key bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty key bindings (no bindings set).
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
            pointer: PointerBindings::default(),
        }
    }

    /// Bind a key to an action, in addition to the action's other keys.
    /// The key is removed from whatever action it was bound to before.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.unbind_key(key);
        self.keys.entry(action).or_default().push(key);
    }

    /// Unbind a key (removes it from its action).
    pub fn unbind_key(&mut self, key: KeyCode) {
        for keys in self.keys.values_mut() {
            keys.retain(|&k| k != key);
        }
    }

    /// Unbind all keys from an action.
    pub fn unbind_action(&mut self, action: InputAction) {
        self.keys.remove(&action);
    }

    /// Get the action bound to a key.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.keys
            .iter()
            .find(|(_, keys)| keys.contains(&key))
            .map(|(&action, _)| action)
    }

    /// Get the keys bound to an action.
    pub fn get_keys(&self, action: InputAction) -> &[KeyCode] {
        self.keys.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any key bound to `action` is held.
    pub fn is_action_held(&self, action: InputAction, source: &dyn InputSource) -> bool {
        self.get_keys(action).iter().any(|&k| source.key_held(k))
    }

    /// Whether any key bound to `action` went down this frame.
    pub fn is_action_pressed(&self, action: InputAction, source: &dyn InputSource) -> bool {
        self.get_keys(action).iter().any(|&k| source.key_pressed(k))
    }

    /// Restore defaults for actions a loaded file left out and drop keys
    /// claimed by more than one action (the action declared first keeps it).
    pub fn sanitized(mut self) -> Self {
        for action in InputAction::ALL {
            self.keys
                .entry(action)
                .or_insert_with(|| action.default_keys());
        }
        let mut seen = Vec::new();
        for keys in self.keys.values_mut() {
            keys.retain(|&k| {
                if k == KeyCode::Unknown || seen.contains(&k) {
                    false
                } else {
                    seen.push(k);
                    true
                }
            });
        }
        self
    }

    /// +1 / -1 / 0 from a pair of opposing actions.
    fn axis(&self, positive: InputAction, negative: InputAction, source: &dyn InputSource) -> f32 {
        let mut value = 0.0;
        if self.is_action_held(positive, source) {
            value += 1.0;
        }
        if self.is_action_held(negative, source) {
            value -= 1.0;
        }
        value
    }

    /// Sample this frame's camera input.
    pub fn camera_input(&self, source: &dyn InputSource) -> CameraInput {
        let pointer_drag =
            source.button_held(self.pointer.steer) || source.button_held(self.pointer.orbit);

        CameraInput {
            pointer_delta: source.pointer_delta(),
            pointer_drag,
            scroll_delta: source.scroll_delta(),
            rotate_keys: Vec2::new(
                self.axis(InputAction::RotateRight, InputAction::RotateLeft, source),
                self.axis(InputAction::PitchUp, InputAction::PitchDown, source),
            ),
            zoom_keys: self.axis(InputAction::ZoomOut, InputAction::ZoomIn, source),
        }
    }

    /// Sample this frame's movement input.
    pub fn movement_input(&self, source: &dyn InputSource) -> MovementInput {
        let steer = source.button_held(self.pointer.steer);
        let orbit = source.button_held(self.pointer.orbit);

        MovementInput {
            axes: Vec2::new(
                self.axis(InputAction::MoveRight, InputAction::MoveLeft, source),
                self.axis(InputAction::MoveForward, InputAction::MoveBackward, source),
            ),
            jump_pressed: self.is_action_pressed(InputAction::Jump, source),
            autorun_toggle_pressed: self.is_action_pressed(InputAction::ToggleAutorun, source),
            free_look_held: steer,
            rotate_with_camera_held: steer,
            both_buttons_held: steer && orbit,
        }
    }
}
