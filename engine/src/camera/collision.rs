//! Camera Collision Module
//!
//! Keeps the orbit camera out of world geometry. The resolver casts from the
//! pivot toward the desired camera point and reports how far along that line
//! the camera can sit; the smoother decides how the camera distance reacts.
//!
//! Response is asymmetric: the camera is pulled in on the same frame an
//! obstruction appears, and only the way back out is optionally eased.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::collision::{CollisionWorld, DIRECTION_EPSILON, LayerMask, ShapeHit};

/// Distance below which a recovering camera is considered back in place (meters)
const RECOVERY_EPSILON: f32 = 1e-3;

/// How obstructions between pivot and camera are detected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// One sphere cast along the view line.
    #[default]
    Single,
    /// The sphere cast plus four thin rays fanned `spread_degrees` off-axis
    /// (left, right, up, down). The nearest obstruction of all five wins.
    Multi { spread_degrees: f32 },
}

/// How the camera moves back out after an obstruction clears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollisionRecovery {
    /// Jump straight back to the desired distance.
    #[default]
    Snap,
    /// Approach the desired distance exponentially at `rate` per second.
    Ease { rate: f32 },
}

/// Camera collision configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraCollisionConfig {
    /// Whether camera collision is enabled
    pub enabled: bool,
    /// Radius of the probe sphere (meters)
    pub radius: f32,
    /// Gap kept between the camera and the obstruction (meters)
    pub buffer: f32,
    /// Layers that block the camera
    pub mask: LayerMask,
    pub policy: CollisionPolicy,
    pub recovery: CollisionRecovery,
}

impl Default for CameraCollisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 0.2,
            buffer: 0.1,
            mask: LayerMask::default(),
            policy: CollisionPolicy::Single,
            recovery: CollisionRecovery::Snap,
        }
    }
}

impl CameraCollisionConfig {
    /// Copy with negative or non-finite sizes replaced.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.radius.is_finite() || self.radius < 0.0 {
            self.radius = defaults.radius;
        }
        if !self.buffer.is_finite() || self.buffer < 0.0 {
            self.buffer = defaults.buffer;
        }
        if let CollisionPolicy::Multi { spread_degrees } = self.policy {
            let spread = if spread_degrees.is_finite() {
                spread_degrees.clamp(0.0, 45.0)
            } else {
                5.0
            };
            self.policy = CollisionPolicy::Multi {
                spread_degrees: spread,
            };
        }
        if let CollisionRecovery::Ease { rate } = self.recovery {
            if !rate.is_finite() || rate <= 0.0 {
                self.recovery = CollisionRecovery::Snap;
            }
        }
        self
    }
}

/// One collision question: can the camera sit at `desired` when orbiting `pivot`?
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionQuery {
    pub pivot: Vec3,
    pub desired: Vec3,
    /// Closest the camera may be pulled toward the pivot
    pub min_distance: f32,
}

/// Outcome of a [`CollisionQuery`]. Recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Usable distance along pivot -> desired, in `[min_distance, desired_distance]`
    pub clear_distance: f32,
    /// Length of the uncollided pivot -> desired line
    pub desired_distance: f32,
    /// Nearest obstruction, if any
    pub hit: Option<ShapeHit>,
}

impl CollisionResult {
    /// Whether the camera has to be pulled in.
    pub fn is_obstructed(&self) -> bool {
        self.clear_distance < self.desired_distance - RECOVERY_EPSILON
    }
}

/// Resolve how far from the pivot the camera may sit.
///
/// The result is the nearest hit distance minus the buffer, floored at
/// `min_distance` and never beyond the desired distance. No hit means the
/// desired distance is returned unchanged; a degenerate pivot/desired pair is
/// treated as clear.
pub fn resolve_clear_distance(
    world: &dyn CollisionWorld,
    query: &CollisionQuery,
    config: &CameraCollisionConfig,
) -> CollisionResult {
    let offset = query.desired - query.pivot;
    let desired_distance = offset.length();
    let clear = CollisionResult {
        clear_distance: desired_distance,
        desired_distance,
        hit: None,
    };

    if !config.enabled || !offset.is_finite() || desired_distance < DIRECTION_EPSILON {
        return clear;
    }
    let direction = offset / desired_distance;
    let max_distance = desired_distance + config.buffer;

    let mut nearest: Option<ShapeHit> = world.cast_shape(
        query.pivot,
        config.radius,
        direction,
        max_distance,
        config.mask,
    );

    if let CollisionPolicy::Multi { spread_degrees } = config.policy {
        for fan in fan_directions(direction, spread_degrees) {
            let ray_hit = world.cast_shape(query.pivot, 0.0, fan, max_distance, config.mask);
            if let Some(hit) = ray_hit {
                if nearest.is_none_or(|best| hit.distance < best.distance) {
                    nearest = Some(hit);
                }
            }
        }
    }

    let Some(hit) = nearest else {
        return clear;
    };

    let floor = query.min_distance.max(0.0).min(desired_distance);
    let clear_distance = (hit.distance - config.buffer).clamp(floor, desired_distance);
    CollisionResult {
        clear_distance,
        desired_distance,
        hit: Some(hit),
    }
}

/// Point at `distance` along the pivot -> desired line.
pub fn point_at_distance(pivot: Vec3, desired: Vec3, distance: f32) -> Vec3 {
    let offset = desired - pivot;
    let length = offset.length();
    if length < DIRECTION_EPSILON {
        return desired;
    }
    pivot + offset * (distance / length)
}

/// Four directions tilted `spread_degrees` left, right, up and down of `direction`.
fn fan_directions(direction: Vec3, spread_degrees: f32) -> [Vec3; 4] {
    let angle = spread_degrees.to_radians();
    let side = direction.cross(Vec3::Y);
    // Looking straight up or down: any horizontal axis will do
    let side = if side.length_squared() < DIRECTION_EPSILON {
        Vec3::X
    } else {
        side.normalize()
    };
    let lift = side.cross(direction).normalize_or(Vec3::Y);

    [
        Quat::from_axis_angle(lift, angle) * direction,
        Quat::from_axis_angle(lift, -angle) * direction,
        Quat::from_axis_angle(side, angle) * direction,
        Quat::from_axis_angle(side, -angle) * direction,
    ]
}

/// Turns per-frame clear distances into the distance the camera actually uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSmoother {
    distance: f32,
    constrained: bool,
}

impl CollisionSmoother {
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            constrained: false,
        }
    }

    /// Distance the camera currently sits at.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Whether an obstruction (or recovery from one) is in effect.
    pub fn is_constrained(&self) -> bool {
        self.constrained
    }

    /// Drop any collision state and sit at `distance`.
    pub fn reset(&mut self, distance: f32) {
        self.distance = distance;
        self.constrained = false;
    }

    /// Advance with this frame's result.
    ///
    /// Moving inward is always immediate. Moving outward follows `recovery`
    /// but never past `result.clear_distance`.
    pub fn update(&mut self, result: &CollisionResult, recovery: CollisionRecovery, dt: f32) -> f32 {
        let limit = result.clear_distance;

        if !self.constrained && !result.is_obstructed() {
            // Free camera: follow the desired distance exactly, zooming included
            self.distance = limit;
            return self.distance;
        }

        if self.distance >= limit {
            self.distance = limit;
        } else {
            self.distance = match recovery {
                CollisionRecovery::Snap => limit,
                CollisionRecovery::Ease { rate } => {
                    let t = 1.0 - (-rate * dt.max(0.0)).exp();
                    (self.distance + (limit - self.distance) * t).min(limit)
                }
            };
        }

        self.constrained = result.is_obstructed()
            || (result.desired_distance - self.distance).abs() > RECOVERY_EPSILON;
        if !self.constrained {
            self.distance = result.desired_distance;
        }
        self.distance
    }
}
