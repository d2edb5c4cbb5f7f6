//! Camera rig configuration.
//!
//! One [`RigConfig`] selects every strategy the rig uses: damping algorithm,
//! deadzone, collision policy and recovery, look-ahead. [`RigPreset`] names
//! the two tunings that ship by default.

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use super::collision::{CameraCollisionConfig, CollisionPolicy, CollisionRecovery};
use super::damping::DampingMode;
use super::deadzone::DeadzonePolicy;

/// Smallest and largest rotation smooth time accepted by the smoothing style setting
pub const SMOOTHING_STYLE_RANGE: (f32, f32) = (0.05, 0.5);

/// Allowed per-axis pointer sensitivity
pub const SENSITIVITY_RANGE: (f32, f32) = (0.1, 5.0);

/// Damping used for each tracked quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DampingConfig {
    /// Yaw and pitch
    pub rotation: DampingMode,
    /// Orbit distance
    pub zoom: DampingMode,
}

impl Default for DampingConfig {
    fn default() -> Self {
        Self {
            rotation: DampingMode::Critical { smooth_time: 0.1 },
            zoom: DampingMode::Critical { smooth_time: 0.15 },
        }
    }
}

/// Pivot bias toward the target's direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookAheadConfig {
    pub enabled: bool,
    /// Offset length at full effect (meters)
    pub distance: f32,
    /// Blend rate toward the current offset (1/s)
    pub speed: f32,
    /// Horizontal speed below which the offset relaxes back to zero (m/s)
    pub min_speed: f32,
}

impl Default for LookAheadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            distance: 2.0,
            speed: 3.0,
            min_speed: 0.1,
        }
    }
}

/// Named tunings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RigPreset {
    /// Critical damping, single cast, instant recovery, first person reachable.
    #[default]
    Classic,
    /// Spring-damper, soft deadzone, multi cast, eased recovery, look-ahead,
    /// over-the-shoulder framing.
    Advanced,
}

/// Complete camera rig configuration.
///
/// Angles are degrees, distances meters, rates per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    // Distance
    pub default_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// At or below this distance the rig is in first person
    pub first_person_threshold: f32,

    // Framing
    /// Height of the orbit pivot above the target root
    pub pivot_height: f32,
    /// Lateral offset of the camera to the right of the view line
    pub shoulder_offset: f32,

    // Pitch
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub default_pitch: f32,

    // Field of view
    pub third_person_fov: f32,
    pub first_person_fov: f32,
    /// Limits for the settable third-person FOV
    pub min_fov: f32,
    pub max_fov: f32,
    /// Lerp rate toward the mode's FOV
    pub fov_ease_rate: f32,

    // Input
    /// Degrees per pointer unit, per axis
    pub sensitivity: Vec2,
    pub invert_y: bool,
    /// Arrow / page key rotation (deg/s)
    pub keyboard_rotation_speed: f32,
    /// Meters per scroll unit
    pub zoom_speed: f32,
    /// Zoom key speed (m/s)
    pub keyboard_zoom_speed: f32,

    // Strategies
    pub damping: DampingConfig,
    pub deadzone: DeadzonePolicy,
    pub collision: CameraCollisionConfig,
    pub look_ahead: LookAheadConfig,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self::preset(RigPreset::Classic)
    }
}

impl RigConfig {
    /// Build one of the named tunings.
    pub fn preset(preset: RigPreset) -> Self {
        match preset {
            RigPreset::Classic => Self {
                default_distance: 5.0,
                min_distance: 0.0,
                max_distance: 15.0,
                first_person_threshold: 0.5,
                pivot_height: 1.65,
                shoulder_offset: 0.0,
                min_pitch: -40.0,
                max_pitch: 40.0,
                default_pitch: 0.0,
                third_person_fov: 70.0,
                first_person_fov: 50.0,
                min_fov: 60.0,
                max_fov: 100.0,
                fov_ease_rate: 5.0,
                sensitivity: Vec2::splat(2.5),
                invert_y: false,
                keyboard_rotation_speed: 120.0,
                zoom_speed: 5.0,
                keyboard_zoom_speed: 3.0,
                damping: DampingConfig::default(),
                deadzone: DeadzonePolicy::Off,
                collision: CameraCollisionConfig::default(),
                look_ahead: LookAheadConfig::default(),
            },
            RigPreset::Advanced => Self {
                min_distance: 2.5,
                shoulder_offset: 0.45,
                sensitivity: Vec2::splat(1.2),
                keyboard_rotation_speed: 90.0,
                zoom_speed: 4.0,
                damping: DampingConfig {
                    rotation: DampingMode::Spring {
                        stiffness: 500.0,
                        damping: 20.0,
                        max_rate: 120.0,
                    },
                    zoom: DampingMode::Spring {
                        stiffness: 500.0,
                        damping: 20.0,
                        max_rate: 5.0,
                    },
                },
                deadzone: DeadzonePolicy::Soft { threshold: 0.001 },
                collision: CameraCollisionConfig {
                    radius: 0.3,
                    buffer: 0.3,
                    policy: CollisionPolicy::Multi { spread_degrees: 5.0 },
                    recovery: CollisionRecovery::Ease { rate: 5.0 },
                    ..CameraCollisionConfig::default()
                },
                look_ahead: LookAheadConfig {
                    enabled: true,
                    ..LookAheadConfig::default()
                },
                ..Self::preset(RigPreset::Classic)
            },
        }
    }

    pub fn with_damping(mut self, rotation: DampingMode, zoom: DampingMode) -> Self {
        self.damping = DampingConfig { rotation, zoom };
        self
    }

    pub fn with_deadzone(mut self, deadzone: DeadzonePolicy) -> Self {
        self.deadzone = deadzone;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision.policy = policy;
        self
    }

    pub fn with_collision_recovery(mut self, recovery: CollisionRecovery) -> Self {
        self.collision.recovery = recovery;
        self
    }

    pub fn with_collision(mut self, collision: CameraCollisionConfig) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_look_ahead(mut self, enabled: bool) -> Self {
        self.look_ahead.enabled = enabled;
        self
    }

    pub fn with_distance_range(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    pub fn with_pitch_range(mut self, min: f32, max: f32) -> Self {
        self.min_pitch = min;
        self.max_pitch = max;
        self
    }

    pub fn with_shoulder_offset(mut self, offset: f32) -> Self {
        self.shoulder_offset = offset;
        self
    }

    /// Clamp a distance into `[min_distance, max_distance]`.
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        if !distance.is_finite() {
            return self.default_distance;
        }
        distance.clamp(self.min_distance, self.max_distance)
    }

    /// Clamp a pitch into `[min_pitch, max_pitch]`.
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        if !pitch.is_finite() {
            return self.default_pitch;
        }
        pitch.clamp(self.min_pitch, self.max_pitch)
    }

    /// Copy with every value inside its valid range.
    ///
    /// Non-finite values fall back to the Classic default, min/max pairs are
    /// put in order and dependent values are clamped into them.
    pub fn sanitized(self) -> Self {
        let d = Self::preset(RigPreset::Classic);
        let mut c = self;

        let fix = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };

        c.min_distance = fix(c.min_distance, d.min_distance).max(0.0);
        c.max_distance = fix(c.max_distance, d.max_distance).max(0.0);
        if c.min_distance > c.max_distance {
            std::mem::swap(&mut c.min_distance, &mut c.max_distance);
        }
        c.default_distance = fix(c.default_distance, d.default_distance)
            .clamp(c.min_distance, c.max_distance);
        c.first_person_threshold = fix(c.first_person_threshold, d.first_person_threshold).max(0.0);

        c.pivot_height = fix(c.pivot_height, d.pivot_height);
        c.shoulder_offset = fix(c.shoulder_offset, d.shoulder_offset);

        c.min_pitch = fix(c.min_pitch, d.min_pitch).clamp(-89.0, 89.0);
        c.max_pitch = fix(c.max_pitch, d.max_pitch).clamp(-89.0, 89.0);
        if c.min_pitch > c.max_pitch {
            std::mem::swap(&mut c.min_pitch, &mut c.max_pitch);
        }
        c.default_pitch = fix(c.default_pitch, d.default_pitch).clamp(c.min_pitch, c.max_pitch);

        c.min_fov = fix(c.min_fov, d.min_fov).clamp(1.0, 179.0);
        c.max_fov = fix(c.max_fov, d.max_fov).clamp(1.0, 179.0);
        if c.min_fov > c.max_fov {
            std::mem::swap(&mut c.min_fov, &mut c.max_fov);
        }
        c.third_person_fov = fix(c.third_person_fov, d.third_person_fov).clamp(c.min_fov, c.max_fov);
        c.first_person_fov = fix(c.first_person_fov, d.first_person_fov).clamp(1.0, 179.0);
        c.fov_ease_rate = fix(c.fov_ease_rate, d.fov_ease_rate).max(0.0);

        let sensitivity = Vec2::new(
            clamp_sensitivity(fix(c.sensitivity.x, d.sensitivity.x)),
            clamp_sensitivity(fix(c.sensitivity.y, d.sensitivity.y)),
        );
        if sensitivity != c.sensitivity {
            debug!("Camera sensitivity {:?} clamped to {:?}", c.sensitivity, sensitivity);
        }
        c.sensitivity = sensitivity;

        c.keyboard_rotation_speed = fix(c.keyboard_rotation_speed, d.keyboard_rotation_speed).max(0.0);
        c.zoom_speed = fix(c.zoom_speed, d.zoom_speed).max(0.0);
        c.keyboard_zoom_speed = fix(c.keyboard_zoom_speed, d.keyboard_zoom_speed).max(0.0);

        c.damping.rotation = c.damping.rotation.sanitized();
        c.damping.zoom = c.damping.zoom.sanitized();
        c.deadzone = c.deadzone.sanitized();
        c.collision = c.collision.sanitized();

        c.look_ahead.distance = fix(c.look_ahead.distance, d.look_ahead.distance).max(0.0);
        c.look_ahead.speed = fix(c.look_ahead.speed, d.look_ahead.speed).max(0.0);
        c.look_ahead.min_speed = fix(c.look_ahead.min_speed, d.look_ahead.min_speed).max(0.0);

        c
    }
}

impl From<RigPreset> for RigConfig {
    fn from(preset: RigPreset) -> Self {
        Self::preset(preset)
    }
}

/// Clamp one sensitivity axis into [`SENSITIVITY_RANGE`].
pub fn clamp_sensitivity(value: f32) -> f32 {
    if !value.is_finite() {
        return SENSITIVITY_RANGE.0;
    }
    value.clamp(SENSITIVITY_RANGE.0, SENSITIVITY_RANGE.1)
}
