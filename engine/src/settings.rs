//! Settings File
//!
//! Camera, movement and input tunables grouped into one JSON document.
//! Every section and field is optional; anything left out keeps its default.
//!
//! ```json
//! {
//!   "camera": { "sensitivity": [1.5, 1.5], "invert_y": true },
//!   "movement": { "jump_height": 2.5 },
//!   "bindings": { "keys": { "jump": ["F"] } }
//! }
//! ```

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{RigConfig, RigPreset};
use crate::input::KeyBindings;
use crate::player::MovementConfig;

/// Errors from loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All user-tunable settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: RigConfig,
    pub movement: MovementConfig,
    pub bindings: KeyBindings,
}

impl Settings {
    /// Defaults with the camera built from `preset`.
    pub fn with_preset(preset: RigPreset) -> Self {
        Self {
            camera: RigConfig::preset(preset),
            ..Default::default()
        }
    }

    /// Parse and sanitize settings from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Read, parse and sanitize a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Bring every section into its valid range.
    pub fn sanitized(self) -> Self {
        Self {
            camera: self.camera.sanitized(),
            movement: self.movement.sanitized(),
            bindings: self.bindings.sanitized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputAction, KeyCode};

    #[test]
    fn test_empty_document_is_default() {
        let settings = Settings::from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default().sanitized());
    }

    #[test]
    fn test_partial_sections() {
        let json = r#"{
            "camera": { "invert_y": true, "max_distance": 20.0 },
            "movement": { "jump_height": 3.0 },
            "bindings": { "keys": { "jump": ["F"] } }
        }"#;
        let settings = Settings::from_json_str(json).unwrap();

        assert!(settings.camera.invert_y);
        assert_eq!(settings.camera.max_distance, 20.0);
        assert_eq!(settings.camera.min_distance, RigConfig::default().min_distance);
        assert_eq!(settings.movement.jump_height, 3.0);
        assert_eq!(settings.bindings.get_action(KeyCode::F), Some(InputAction::Jump));
        assert_eq!(settings.bindings.get_action(KeyCode::W), Some(InputAction::MoveForward));
    }

    #[test]
    fn test_smaller_ground_probe_keeps_body_size() {
        let json = r#"{ "movement": { "ground_check_radius": 0.1 } }"#;
        let settings = Settings::from_json_str(json).unwrap();
        assert_eq!(settings.movement.ground_check_radius, 0.1);
        assert_eq!(settings.movement.body_radius, MovementConfig::default().body_radius);
    }

    #[test]
    fn test_loaded_values_are_sanitized() {
        let json = r#"{ "camera": { "min_distance": 12.0, "max_distance": 3.0 } }"#;
        let settings = Settings::from_json_str(json).unwrap();
        assert!(settings.camera.min_distance <= settings.camera.max_distance);
    }

    #[test]
    fn test_parse_error() {
        let err = Settings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/nonexistent/orbit_rig/settings.json").unwrap_err();
        match err {
            SettingsError::Io { path, .. } => {
                assert!(path.ends_with("settings.json"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_pretty_json_reloads() {
        let settings = Settings::with_preset(RigPreset::Advanced);
        let json = settings.to_json_pretty().unwrap();
        let reloaded = Settings::from_json_str(&json).unwrap();
        assert_eq!(reloaded.camera.shoulder_offset, settings.camera.shoulder_offset);
        assert_eq!(reloaded.camera.deadzone, settings.camera.deadzone);
    }
}
