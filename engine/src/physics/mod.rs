//! Physics collaborators for the camera rig and movement controller.
//!
//! The core never owns or mutates world geometry. Everything it needs from
//! physics goes through two traits:
//!
//! - [`CollisionWorld`] - sphere overlap and sphere/ray cast queries
//! - [`KinematicBody`] - commit a displacement, get back the real one
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam
//! - [`collision`] - Query trait, layer masks and the `StaticWorld` reference world
//! - [`body`] - Kinematic body trait and the swept-sphere body

pub mod body;
pub mod collision;
pub mod types;

pub use body::{KinematicBody, SweptBody};
pub use collision::{
    Collider, ColliderShape, CollisionWorld, EmptyWorld, Layer, LayerMask, ShapeHit, StaticWorld,
    aabb_surface_normal, ray_aabb_intersect,
};
pub use types::{Quat, Vec2, Vec3};
