//! Camera Module
//!
//! Orbit camera rig with damped trackers, deadzone filtering, collision
//! resolution and first/third-person switching.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod collision;
pub mod config;
pub mod damping;
pub mod deadzone;
pub mod rig;

pub use collision::{
    CameraCollisionConfig, CollisionPolicy, CollisionQuery, CollisionRecovery, CollisionResult,
    CollisionSmoother, resolve_clear_distance,
};
pub use config::{DampingConfig, LookAheadConfig, RigConfig, RigPreset};
pub use damping::{DampedQuantity, DampingMode, delta_angle, normalize_angle};
pub use deadzone::DeadzonePolicy;
pub use rig::{
    CameraBasis, CameraInput, CameraMode, CameraRig, CameraRigState, CameraTransform, TargetHandle,
    TargetPose, TargetRegistry,
};
