//! Player Module
//!
//! Provides player character movement and control systems.
//!
//! # Components
//!
//! - [`MovementController`] - Ground/air state machine with camera-relative WASD controls
//!   - Snappy ground movement, momentum-preserving air control
//!   - Jump, gravity with terminal velocity, autorun
//! - [`MovementConfig`] - Speeds, jump and air-control tunables

pub mod movement_controller;

pub use movement_controller::{
    BACKWARD_SPEED, GRAVITY, GROUNDED_STICK_VELOCITY, GroundState, JUMP_HEIGHT, MovementConfig,
    MovementController, MovementInput, MovementState, STRAFE_SPEED, TERMINAL_VELOCITY, WALK_SPEED,
};
