//! Orbit Rig Engine Library
//!
//! A third-person orbit camera rig and a ground/air character movement
//! controller, driven together once per frame.
//! Window-system and renderer agnostic: input, collision geometry and time
//! come in through small traits, and the output is a camera transform plus a
//! moved character.
//!
//! # Modules
//!
//! - [`camera`] - Orbit rig: damping, deadzone, collision, first/third person
//! - [`player`] - Movement controller (walk/strafe/backpedal, jump, air control, autorun)
//! - [`physics`] - Collision world queries and the swept kinematic body
//! - [`input`] - Platform-agnostic keyboard/mouse state and key bindings
//! - [`frame`] - Frame clock and the ordered camera → movement → camera pipeline
//! - [`console`] - Text commands for camera settings
//! - [`settings`] - JSON settings file
//!
//! # Example
//!
//! ```ignore
//! use orbit_rig_engine::frame::{FixedClock, FramePipeline};
//! use orbit_rig_engine::input::{InputState, KeyCode};
//! use orbit_rig_engine::physics::StaticWorld;
//! use orbit_rig_engine::settings::Settings;
//! use glam::Vec3;
//!
//! let mut world = StaticWorld::new();
//! world.add_ground_plane(0.0);
//!
//! let mut pipeline = FramePipeline::from_settings(&Settings::default(), Vec3::ZERO);
//! let mut clock = FixedClock::from_hz(60.0);
//! let mut input = InputState::new();
//!
//! input.keyboard.handle_key(KeyCode::W, true);
//! let frame = pipeline.run_frame(&mut clock, &input, &world);
//! input.end_frame();
//! println!("camera at {:?}", frame.camera.position);
//! ```

pub mod camera;
pub mod console;
pub mod frame;
pub mod input;
pub mod physics;
pub mod player;
pub mod settings;

// Re-export the types most callers need
pub use camera::{CameraInput, CameraMode, CameraRig, CameraTransform, RigConfig, RigPreset};
pub use frame::{FixedClock, FrameClock, FramePipeline, SystemClock};
pub use input::{InputState, KeyBindings, KeyCode, MouseButton};
pub use physics::{CollisionWorld, KinematicBody, StaticWorld, SweptBody};
pub use player::{MovementConfig, MovementController, MovementInput};
pub use settings::{Settings, SettingsError};
