//! Math type re-exports from glam
//!
//! The whole crate speaks glam: `Vec3` for positions and directions, `Vec2`
//! for two-axis input, `Quat` for orientations. Angles crossing the public API
//! are in degrees unless a name says otherwise. Y is up and yaw 0 looks
//! toward -Z.

pub use glam::{Quat, Vec2, Vec3};

/// Orientation for a yaw/pitch pair in degrees.
///
/// Yaw turns clockwise seen from above (toward +X); positive pitch tilts the
/// view down, which lifts an orbiting camera above its pivot.
#[inline]
pub fn orientation_from_yaw_pitch(yaw_degrees: f32, pitch_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians()) * Quat::from_rotation_x(-pitch_degrees.to_radians())
}

/// Yaw in degrees of a horizontal direction, or `None` when it has no
/// horizontal extent.
#[inline]
pub fn yaw_of_direction(direction: Vec3) -> Option<f32> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < 1e-8 {
        None
    } else {
        Some(flat.x.atan2(-flat.z).to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_zero_looks_down_negative_z() {
        let forward = orientation_from_yaw_pitch(0.0, 0.0) * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_positive_yaw_turns_toward_positive_x() {
        let forward = orientation_from_yaw_pitch(90.0, 0.0) * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5);
        let right = orientation_from_yaw_pitch(90.0, 0.0) * Vec3::X;
        assert!((right - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let forward = orientation_from_yaw_pitch(0.0, 30.0) * Vec3::NEG_Z;
        assert!(forward.y < -0.49 && forward.y > -0.51);
    }

    #[test]
    fn test_yaw_of_direction_round_trip() {
        let yaw = yaw_of_direction(orientation_from_yaw_pitch(-135.0, 20.0) * Vec3::NEG_Z).unwrap();
        assert!((yaw + 135.0).abs() < 1e-3);
        assert!(yaw_of_direction(Vec3::Y).is_none());
    }
}
