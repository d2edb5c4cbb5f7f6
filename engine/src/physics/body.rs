//! Kinematic body module
//!
//! [`KinematicBody`] is the one write-side collaborator of the movement
//! controller: it takes a requested displacement and reports what actually
//! happened. [`SweptBody`] is a sphere-swept implementation with
//! collide-and-slide against a [`CollisionWorld`].

use glam::Vec3;

use super::collision::{CollisionWorld, LayerMask};

/// Gap kept between the body and any surface it slides along (meters)
pub const SKIN_WIDTH: f32 = 0.01;

/// Maximum collide-and-slide iterations per move
pub const MAX_SLIDE_ITERATIONS: usize = 4;

/// A body that moves only when told to.
///
/// `position` is the feet/root point the camera tracks.
pub trait KinematicBody {
    /// Current root position.
    fn position(&self) -> Vec3;

    /// Commit a movement delta and return the actual displacement, which may be
    /// shorter than `delta` when the move was blocked.
    fn apply_kinematic_move(&mut self, delta: Vec3, world: &dyn CollisionWorld) -> Vec3;

    /// Teleport without collision.
    fn set_position(&mut self, position: Vec3);
}

/// Sphere-swept kinematic body.
///
/// The collision sphere sits `radius` above the root so a body standing on the
/// ground has its root exactly on the surface.
#[derive(Debug, Clone)]
pub struct SweptBody {
    /// Root (feet) position in world space
    position: Vec3,
    /// Collision sphere radius in meters (default: 0.4)
    pub radius: f32,
    /// Layers this body collides with (default: everything but the player)
    pub collision_mask: LayerMask,
}

impl Default for SweptBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            radius: 0.4,
            collision_mask: LayerMask::default(),
        }
    }
}

impl SweptBody {
    /// Create a new body at `position` with default radius.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a body with a custom collision radius.
    pub fn with_radius(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius: radius.max(0.01),
            ..Default::default()
        }
    }

    #[inline]
    fn sphere_center(&self) -> Vec3 {
        self.position + Vec3::Y * self.radius
    }
}

impl KinematicBody for SweptBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn apply_kinematic_move(&mut self, delta: Vec3, world: &dyn CollisionWorld) -> Vec3 {
        if !delta.is_finite() {
            return Vec3::ZERO;
        }

        let start = self.position;
        let mut remaining = delta;

        for _ in 0..MAX_SLIDE_ITERATIONS {
            let length = remaining.length();
            if length < 1e-6 {
                break;
            }
            let direction = remaining / length;

            match world.cast_shape(
                self.sphere_center(),
                self.radius,
                direction,
                length,
                self.collision_mask,
            ) {
                None => {
                    self.position += remaining;
                    break;
                }
                Some(hit) => {
                    let travel = (hit.distance - SKIN_WIDTH).max(0.0);
                    self.position += direction * travel;

                    // Slide the rest of the move along the blocking surface
                    let leftover = remaining - direction * travel;
                    remaining = leftover - hit.normal * leftover.dot(hit.normal);
                }
            }
        }

        self.position - start
    }

    fn set_position(&mut self, position: Vec3) {
        if position.is_finite() {
            self.position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::{EmptyWorld, StaticWorld};

    #[test]
    fn test_free_move_is_unchanged() {
        let mut body = SweptBody::new(Vec3::ZERO);
        let moved = body.apply_kinematic_move(Vec3::new(1.0, 0.5, -2.0), &EmptyWorld);
        assert!((moved - Vec3::new(1.0, 0.5, -2.0)).length() < 1e-6);
        assert_eq!(body.position(), Vec3::new(1.0, 0.5, -2.0));
    }

    #[test]
    fn test_falling_onto_ground_stops_at_surface() {
        let mut world = StaticWorld::new();
        world.add_ground_plane(0.0);

        let mut body = SweptBody::new(Vec3::new(0.0, 1.0, 0.0));
        let moved = body.apply_kinematic_move(Vec3::new(0.0, -5.0, 0.0), &world);

        assert!(moved.y > -1.0);
        assert!(body.position().y >= 0.0);
        assert!(body.position().y < 0.05);
    }

    #[test]
    fn test_slides_along_wall() {
        let mut world = StaticWorld::new();
        world.add_plane(Vec3::NEG_Z, -1.0); // wall at z = 1

        let mut body = SweptBody::new(Vec3::ZERO);
        let moved = body.apply_kinematic_move(Vec3::new(1.0, 0.0, 2.0), &world);

        // Blocked in z, but keeps the x component
        assert!(body.position().z < 1.0 - body.radius + 0.05);
        assert!((moved.x - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let mut body = SweptBody::new(Vec3::ONE);
        let moved = body.apply_kinematic_move(Vec3::new(f32::NAN, 0.0, 0.0), &EmptyWorld);
        assert_eq!(moved, Vec3::ZERO);
        assert_eq!(body.position(), Vec3::ONE);
    }
}
