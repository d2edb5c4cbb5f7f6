//! Camera Rig Module
//!
//! Orbit camera around an externally owned target. Owns yaw, pitch and
//! distance (each a damped quantity), the first/third-person mode, and the
//! field of view, and produces one [`CameraTransform`] per frame.
//!
//! ## Frame stages
//!
//! The rig advances in two stages so character movement can run in between:
//!
//! 1. [`CameraRig::advance_orientation`] - input into setpoints, then damping.
//!    After this the camera yaw for the frame is final, so movement can read
//!    [`CameraRig::basis`].
//! 2. [`CameraRig::advance_follow`] - sample the (already moved) target, derive
//!    the mode, ease FOV, resolve collision and commit the transform.
//!
//! [`CameraRig::advance`] runs both back to back for callers without movement.
//!
//! ## Conventions
//!
//! Y-up. Yaw 0 looks toward -Z and grows toward +X. Positive pitch looks down,
//! lifting the camera above the pivot. All angles in degrees.

use glam::{Quat, Vec2, Vec3};
use log::{debug, info, warn};

use super::collision::{
    CollisionQuery, CollisionResult, CollisionSmoother, point_at_distance, resolve_clear_distance,
};
use super::config::{RigConfig, SMOOTHING_STYLE_RANGE, clamp_sensitivity};
use super::damping::{DampedQuantity, normalize_angle};
use crate::physics::collision::CollisionWorld;
use crate::physics::types::{orientation_from_yaw_pitch, yaw_of_direction};

/// Camera mode, derived from the orbit distance every frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CameraMode {
    /// Orbiting behind the target
    #[default]
    ThirdPerson,
    /// Camera at the pivot, target hidden
    FirstPerson,
}

impl CameraMode {
    /// `FirstPerson` iff `distance <= threshold`.
    #[inline]
    pub fn from_distance(distance: f32, threshold: f32) -> Self {
        if distance <= threshold {
            CameraMode::FirstPerson
        } else {
            CameraMode::ThirdPerson
        }
    }
}

/// Opaque reference to a tracked entity. The rig never owns the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetHandle(pub u32);

/// Pose of a tracked entity as reported by its owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPose {
    /// Root (feet) position
    pub position: Vec3,
    /// Facing direction
    pub forward: Vec3,
    /// Right of facing
    pub right: Vec3,
    /// Current velocity, used for look-ahead
    pub velocity: Vec3,
}

impl TargetPose {
    /// Pose at rest with `right` derived from `forward`.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        let forward = forward.normalize_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        Self {
            position,
            forward,
            right,
            velocity: Vec3::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Facing yaw in degrees, if the forward axis is not vertical.
    pub fn facing_yaw(&self) -> Option<f32> {
        yaw_of_direction(self.forward)
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.forward.is_finite()
            && self.right.is_finite()
            && self.velocity.is_finite()
    }
}

/// Lookup from target handles to live poses, plus the one write the rig
/// performs on its target: showing or hiding its visuals.
pub trait TargetRegistry {
    /// Current pose of `handle`, or `None` if it no longer exists.
    fn target_pose(&self, handle: TargetHandle) -> Option<TargetPose>;

    /// Show or hide the target's own visual representation.
    fn set_target_visible(&mut self, handle: TargetHandle, visible: bool);
}

/// Final camera placement for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl CameraTransform {
    /// Direction the camera looks.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.fov.is_finite()
    }
}

/// Gravity-flattened camera axes used for camera-relative movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Camera yaw in degrees
    pub yaw: f32,
    /// Horizontal unit forward
    pub forward: Vec3,
    /// Horizontal unit right
    pub right: Vec3,
}

impl CameraBasis {
    pub fn from_yaw(yaw_degrees: f32) -> Self {
        let yaw = if yaw_degrees.is_finite() { yaw_degrees } else { 0.0 };
        let (sin, cos) = yaw.to_radians().sin_cos();
        Self {
            yaw,
            forward: Vec3::new(sin, 0.0, -cos),
            right: Vec3::new(cos, 0.0, sin),
        }
    }

    /// Flatten an arbitrary view direction. Falls back to `fallback_yaw` when
    /// the direction is vertical or degenerate.
    pub fn from_direction(direction: Vec3, fallback_yaw: f32) -> Self {
        Self::from_yaw(yaw_of_direction(direction).unwrap_or(fallback_yaw))
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::from_yaw(0.0)
    }
}

/// Camera input for one frame, already mapped from devices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraInput {
    /// Raw pointer movement in screen units (+x right, +y down)
    pub pointer_delta: Vec2,
    /// Whether pointer movement should rotate the camera (a drag button is held)
    pub pointer_drag: bool,
    /// Wheel movement, positive zooms in
    pub scroll_delta: f32,
    /// Rotate keys: x +1 turns right, y +1 looks up
    pub rotate_keys: Vec2,
    /// Zoom keys: +1 moves out, -1 moves in
    pub zoom_keys: f32,
}

/// Read-only snapshot of the rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRigState {
    pub yaw: f32,
    pub pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub distance: f32,
    pub target_distance: f32,
    /// Distance actually used after collision
    pub collision_distance: f32,
    pub mode: CameraMode,
    pub fov: f32,
}

/// Orbit camera rig.
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: RigConfig,
    /// Values `reset_to_defaults` returns to
    defaults: RigConfig,

    target: Option<TargetHandle>,
    missing_target_logged: bool,
    visibility_synced: bool,

    yaw: DampedQuantity,
    pitch: DampedQuantity,
    distance: DampedQuantity,
    mode: CameraMode,
    fov: f32,

    collision: CollisionSmoother,
    last_collision: Option<CollisionResult>,
    look_ahead: Vec3,
    last_facing_yaw: f32,

    transform: CameraTransform,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(RigConfig::default())
    }
}

impl CameraRig {
    /// Create a rig with no target. The config is sanitized first.
    pub fn new(config: RigConfig) -> Self {
        let config = config.sanitized();
        let mode = CameraMode::from_distance(config.default_distance, config.first_person_threshold);
        let fov = match mode {
            CameraMode::ThirdPerson => config.third_person_fov,
            CameraMode::FirstPerson => config.first_person_fov,
        };
        let rotation = orientation_from_yaw_pitch(0.0, config.default_pitch);
        let position = Vec3::Y * config.pivot_height + rotation * Vec3::Z * config.default_distance;

        Self {
            config,
            defaults: config,
            target: None,
            missing_target_logged: false,
            visibility_synced: false,
            yaw: DampedQuantity::new(0.0),
            pitch: DampedQuantity::new(config.default_pitch),
            distance: DampedQuantity::new(config.default_distance),
            mode,
            fov,
            collision: CollisionSmoother::new(config.default_distance),
            last_collision: None,
            look_ahead: Vec3::ZERO,
            last_facing_yaw: 0.0,
            transform: CameraTransform {
                position,
                rotation,
                fov,
            },
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn target(&self) -> Option<TargetHandle> {
        self.target
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Transform committed by the last successful follow stage.
    pub fn transform(&self) -> CameraTransform {
        self.transform
    }

    /// Collision result of the last third-person frame.
    pub fn last_collision(&self) -> Option<CollisionResult> {
        self.last_collision
    }

    /// Flattened camera axes for this frame's yaw.
    pub fn basis(&self) -> CameraBasis {
        CameraBasis::from_yaw(self.yaw.value)
    }

    pub fn state(&self) -> CameraRigState {
        CameraRigState {
            yaw: self.yaw.value,
            pitch: self.pitch.value,
            target_yaw: normalize_angle(self.yaw.setpoint),
            target_pitch: self.pitch.setpoint,
            distance: self.distance.value,
            target_distance: self.distance.setpoint,
            collision_distance: self.collision.distance(),
            mode: self.mode,
            fov: self.fov,
        }
    }

    // =========================================================================
    // External API
    // =========================================================================

    /// Track `target`, or nothing. Re-arms the missing-target warning.
    pub fn set_target(&mut self, target: Option<TargetHandle>) {
        if self.target != target {
            debug!("Camera target set to {:?}", target);
        }
        self.target = target;
        self.missing_target_logged = false;
        self.visibility_synced = false;
    }

    /// Set the third-person field of view, clamped to the configured limits.
    /// The live FOV eases toward it.
    pub fn set_field_of_view(&mut self, fov: f32) {
        let clamped = if fov.is_finite() {
            fov.clamp(self.config.min_fov, self.config.max_fov)
        } else {
            self.config.third_person_fov
        };
        if clamped != fov {
            debug!("Field of view {} clamped to {}", fov, clamped);
        }
        self.config.third_person_fov = clamped;
    }

    /// Set per-axis pointer sensitivity.
    pub fn set_sensitivity(&mut self, x: f32, y: f32) {
        let sensitivity = Vec2::new(clamp_sensitivity(x), clamp_sensitivity(y));
        if sensitivity != Vec2::new(x, y) {
            debug!("Sensitivity ({}, {}) clamped to {:?}", x, y, sensitivity);
        }
        self.config.sensitivity = sensitivity;
    }

    /// Jump to an orbit distance (clamped) with no easing.
    pub fn set_distance(&mut self, distance: f32) {
        let clamped = self.config.clamp_distance(distance);
        if clamped != distance {
            debug!("Camera distance {} clamped to {}", distance, clamped);
        }
        self.distance.snap(clamped);
    }

    /// Jump to a yaw/pitch pair (pitch clamped) with no easing.
    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        let yaw = if yaw.is_finite() { normalize_angle(yaw) } else { self.yaw.value };
        let clamped = self.config.clamp_pitch(pitch);
        if clamped != pitch {
            debug!("Camera pitch {} clamped to {}", pitch, clamped);
        }
        self.yaw.snap(yaw);
        self.pitch.snap(clamped);
    }

    /// Rotation smoothing in seconds, clamped to [`SMOOTHING_STYLE_RANGE`].
    ///
    /// Critical damping takes it as the smooth time; a spring is re-tuned to
    /// settle on the same time scale.
    pub fn set_smoothing_style(&mut self, seconds: f32) {
        let (lo, hi) = SMOOTHING_STYLE_RANGE;
        let seconds = if seconds.is_finite() { seconds.clamp(lo, hi) } else { lo };
        self.config.damping.rotation = self.config.damping.rotation.with_settle_time(seconds);
        debug!("Camera rotation smoothing set to {:.3}s", seconds);
    }

    /// Restore the construction-time config and put the camera behind the
    /// target at default pitch and distance, at rest.
    pub fn reset_to_defaults(&mut self) {
        self.config = self.defaults;
        self.yaw.snap(self.last_facing_yaw);
        self.pitch.snap(self.config.default_pitch);
        self.distance.snap(self.config.default_distance);
        self.collision.reset(self.config.default_distance);
        self.look_ahead = Vec3::ZERO;
        self.fov = match CameraMode::from_distance(
            self.config.default_distance,
            self.config.first_person_threshold,
        ) {
            CameraMode::ThirdPerson => self.config.third_person_fov,
            CameraMode::FirstPerson => self.config.first_person_fov,
        };
        info!("Camera reset to defaults");
    }

    // =========================================================================
    // Per-frame update
    // =========================================================================

    /// Stage 1: apply input to the setpoints and advance the damped trackers.
    ///
    /// Does nothing while no target is set.
    pub fn advance_orientation(&mut self, input: &CameraInput, dt: f32) {
        if self.target.is_none() || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let config = self.config;

        // Rotation input
        let mut yaw_delta = 0.0;
        let mut pitch_delta = 0.0;
        if input.pointer_drag {
            let pointer = config.deadzone.apply(input.pointer_delta);
            yaw_delta += pointer.x * config.sensitivity.x;
            let vertical = pointer.y * config.sensitivity.y;
            pitch_delta += if config.invert_y { -vertical } else { vertical };
        }
        let keys = finite_vec2(input.rotate_keys).clamp(Vec2::NEG_ONE, Vec2::ONE);
        yaw_delta += keys.x * config.keyboard_rotation_speed * dt;
        pitch_delta -= keys.y * config.keyboard_rotation_speed * dt;

        // Yaw setpoint stays unwrapped so a fast drag is never chased backwards
        self.yaw.setpoint += yaw_delta;
        self.pitch.setpoint = config.clamp_pitch(self.pitch.setpoint + pitch_delta);

        // Zoom input
        let zoom = -finite(input.scroll_delta) * config.zoom_speed
            + finite(input.zoom_keys).clamp(-1.0, 1.0) * config.keyboard_zoom_speed * dt;
        self.distance.setpoint = config.clamp_distance(self.distance.setpoint + zoom);

        // Damping
        self.yaw.advance_winding(&config.damping.rotation, dt);
        self.pitch.advance(&config.damping.rotation, dt);
        self.distance.advance(&config.damping.zoom, dt);

        // An underdamped spring may overshoot a bound; the bound wins
        clamp_tracked(&mut self.pitch, config.min_pitch, config.max_pitch);
        clamp_tracked(&mut self.distance, config.min_distance, config.max_distance);
    }

    /// Stage 2: follow the target and commit the frame's transform.
    ///
    /// With no target, or a target the registry no longer knows, the last
    /// transform is returned unchanged.
    pub fn advance_follow(
        &mut self,
        registry: &mut dyn TargetRegistry,
        world: &dyn CollisionWorld,
        dt: f32,
    ) -> CameraTransform {
        let Some(handle) = self.target else {
            self.log_missing_target(None);
            return self.transform;
        };
        let Some(pose) = registry.target_pose(handle).filter(TargetPose::is_finite) else {
            self.log_missing_target(Some(handle));
            return self.transform;
        };
        self.missing_target_logged = false;

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let config = self.config;

        if let Some(yaw) = pose.facing_yaw() {
            self.last_facing_yaw = yaw;
        }

        self.update_look_ahead(&pose, dt);

        // Mode follows distance; visuals follow mode
        let mode = CameraMode::from_distance(self.distance.value, config.first_person_threshold);
        if mode != self.mode || !self.visibility_synced {
            if mode != self.mode {
                debug!("Camera mode {:?} -> {:?}", self.mode, mode);
            }
            registry.set_target_visible(handle, mode == CameraMode::ThirdPerson);
            self.mode = mode;
            self.visibility_synced = true;
        }

        let fov_target = match mode {
            CameraMode::ThirdPerson => config.third_person_fov,
            CameraMode::FirstPerson => config.first_person_fov,
        };
        self.fov += (fov_target - self.fov) * (dt * config.fov_ease_rate).clamp(0.0, 1.0);

        let pivot = pose.position + Vec3::Y * config.pivot_height + self.look_ahead;
        let rotation = orientation_from_yaw_pitch(self.yaw.value, self.pitch.value);

        let position = match mode {
            CameraMode::FirstPerson => {
                self.collision.reset(self.distance.value);
                self.last_collision = None;
                pivot
            }
            CameraMode::ThirdPerson => {
                let desired = pivot
                    + rotation * Vec3::Z * self.distance.value
                    + rotation * Vec3::X * config.shoulder_offset;
                // The floor is on the orbit distance; the shoulder offset
                // slants the cast line, so stretch the floor onto it
                let slant = (desired - pivot).length();
                let min_distance = if self.distance.value > f32::EPSILON {
                    config.min_distance * slant / self.distance.value
                } else {
                    config.min_distance
                };
                let query = CollisionQuery {
                    pivot,
                    desired,
                    min_distance,
                };
                let result = resolve_clear_distance(world, &query, &config.collision);
                let distance = self.collision.update(&result, config.collision.recovery, dt);
                self.last_collision = Some(result);
                point_at_distance(pivot, desired, distance)
            }
        };

        let transform = CameraTransform {
            position,
            rotation,
            fov: self.fov,
        };
        if !transform.is_finite() {
            warn!("Rejected non-finite camera transform {:?}", transform);
            return self.transform;
        }
        self.transform = transform;
        transform
    }

    /// Both stages back to back.
    pub fn advance(
        &mut self,
        input: &CameraInput,
        registry: &mut dyn TargetRegistry,
        world: &dyn CollisionWorld,
        dt: f32,
    ) -> CameraTransform {
        self.advance_orientation(input, dt);
        self.advance_follow(registry, world, dt)
    }

    fn update_look_ahead(&mut self, pose: &TargetPose, dt: f32) {
        let look = self.config.look_ahead;
        if !look.enabled {
            self.look_ahead = Vec3::ZERO;
            return;
        }
        let horizontal = Vec3::new(pose.velocity.x, 0.0, pose.velocity.z);
        let goal = if horizontal.length() > look.min_speed {
            horizontal.normalize() * look.distance
        } else {
            Vec3::ZERO
        };
        self.look_ahead = self.look_ahead.lerp(goal, (dt * look.speed).clamp(0.0, 1.0));
    }

    fn log_missing_target(&mut self, handle: Option<TargetHandle>) {
        if self.missing_target_logged {
            return;
        }
        match handle {
            None => warn!("Camera rig has no target; holding last transform"),
            Some(handle) => warn!("Camera target {:?} is gone; holding last transform", handle),
        }
        self.missing_target_logged = true;
    }
}

#[inline]
fn finite(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

#[inline]
fn finite_vec2(value: Vec2) -> Vec2 {
    if value.is_finite() { value } else { Vec2::ZERO }
}

/// Keep a tracked quantity inside `[min, max]`, stopping it at the bound.
fn clamp_tracked(quantity: &mut DampedQuantity, min: f32, max: f32) {
    let clamped = quantity.value.clamp(min, max);
    if clamped != quantity.value {
        quantity.value = clamped;
        quantity.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::{EmptyWorld, StaticWorld};

    const DT: f32 = 1.0 / 60.0;

    struct OnePose {
        pose: Option<TargetPose>,
        visible: Vec<bool>,
    }

    impl TargetRegistry for OnePose {
        fn target_pose(&self, _handle: TargetHandle) -> Option<TargetPose> {
            self.pose
        }

        fn set_target_visible(&mut self, _handle: TargetHandle, visible: bool) {
            self.visible.push(visible);
        }
    }

    fn at_origin() -> OnePose {
        OnePose {
            pose: Some(TargetPose::new(Vec3::ZERO, Vec3::NEG_Z)),
            visible: Vec::new(),
        }
    }

    fn rig() -> CameraRig {
        let mut rig = CameraRig::default();
        rig.set_target(Some(TargetHandle(1)));
        rig
    }

    #[test]
    fn test_camera_sits_behind_and_above_pivot() {
        let mut rig = rig();
        rig.set_rotation(0.0, 20.0);
        let t = rig.advance(&CameraInput::default(), &mut at_origin(), &EmptyWorld, DT);

        // Yaw 0 looks toward -Z, so the camera is on +Z
        assert!(t.position.z > 0.0);
        assert!(t.position.y > 1.65);
        assert!(((t.position - Vec3::Y * 1.65).length() - 5.0).abs() < 1e-3);
        assert!(t.forward().y < 0.0);
    }

    #[test]
    fn test_shoulder_offset_shifts_camera_right() {
        let mut rig = CameraRig::new(RigConfig::default().with_shoulder_offset(0.45));
        rig.set_target(Some(TargetHandle(1)));
        let t = rig.advance(&CameraInput::default(), &mut at_origin(), &EmptyWorld, DT);

        assert!((t.position.x - 0.45).abs() < 1e-3);
        assert!((t.position.z - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_min_distance_floors_orbit_distance_with_shoulder_offset() {
        let config = RigConfig::default()
            .with_shoulder_offset(0.45)
            .with_distance_range(2.5, 20.0);
        let mut rig = CameraRig::new(config);
        rig.set_target(Some(TargetHandle(1)));
        // Wall at z = 1, far closer than the floor
        let mut world = StaticWorld::new();
        world.add_plane(Vec3::NEG_Z, -1.0);

        let t = rig.advance(&CameraInput::default(), &mut at_origin(), &world, DT);

        // Yaw 0, pitch 0: the orbit axis is +Z and the shoulder axis +X
        assert!((t.position.z - 2.5).abs() < 1e-3, "orbit distance {}", t.position.z);
        assert!((t.position.x - 0.45 * 2.5 / 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_basis_is_flat_and_orthogonal() {
        let basis = CameraBasis::from_yaw(37.0);
        assert!(basis.forward.y.abs() < 1e-6);
        assert!(basis.forward.dot(basis.right).abs() < 1e-6);
        assert!((basis.forward.cross(basis.right) - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_basis_from_vertical_direction_uses_fallback() {
        let basis = CameraBasis::from_direction(Vec3::Y, 90.0);
        assert!((basis.forward - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_keyboard_rotation() {
        let mut rig = rig();
        let input = CameraInput {
            rotate_keys: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        for _ in 0..60 {
            rig.advance_orientation(&input, DT);
        }
        // 120 deg/s for one second
        assert!((rig.state().target_yaw - 120.0).abs() < 0.1);
    }

    #[test]
    fn test_pointer_ignored_without_drag() {
        let mut rig = rig();
        let input = CameraInput {
            pointer_delta: Vec2::new(50.0, 50.0),
            ..Default::default()
        };
        rig.advance_orientation(&input, DT);
        assert_eq!(rig.state().target_yaw, 0.0);
        assert_eq!(rig.state().target_pitch, 0.0);
    }

    #[test]
    fn test_invert_y() {
        let mut config = RigConfig::default();
        config.invert_y = true;
        let mut rig = CameraRig::new(config);
        rig.set_target(Some(TargetHandle(1)));
        let input = CameraInput {
            pointer_delta: Vec2::new(0.0, 2.0),
            pointer_drag: true,
            ..Default::default()
        };
        rig.advance_orientation(&input, DT);
        assert!(rig.state().target_pitch < 0.0);
    }

    #[test]
    fn test_orientation_waits_for_target() {
        let mut rig = CameraRig::default();
        let input = CameraInput {
            scroll_delta: -10.0,
            ..Default::default()
        };
        rig.advance_orientation(&input, DT);
        assert_eq!(rig.state().target_distance, 5.0);
    }

    #[test]
    fn test_first_person_hides_target_and_centers_camera() {
        let mut rig = rig();
        let mut registry = at_origin();
        rig.set_distance(0.0);
        let t = rig.advance(&CameraInput::default(), &mut registry, &EmptyWorld, DT);

        assert_eq!(rig.mode(), CameraMode::FirstPerson);
        assert_eq!(registry.visible, vec![false]);
        assert!((t.position - Vec3::Y * 1.65).length() < 1e-5);
    }

    #[test]
    fn test_fov_eases_toward_mode_target() {
        let mut rig = rig();
        let mut registry = at_origin();
        rig.set_distance(0.0);
        let first = rig.advance(&CameraInput::default(), &mut registry, &EmptyWorld, DT).fov;
        assert!(first < 70.0 && first > 50.0);
        for _ in 0..300 {
            rig.advance(&CameraInput::default(), &mut registry, &EmptyWorld, DT);
        }
        assert!((rig.state().fov - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_set_field_of_view_clamps() {
        let mut rig = rig();
        rig.set_field_of_view(150.0);
        assert_eq!(rig.config().third_person_fov, 100.0);
        rig.set_field_of_view(10.0);
        assert_eq!(rig.config().third_person_fov, 60.0);
        rig.set_field_of_view(f32::NAN);
        assert_eq!(rig.config().third_person_fov, 60.0);
    }

    #[test]
    fn test_set_sensitivity_clamps() {
        let mut rig = rig();
        rig.set_sensitivity(0.0, 50.0);
        assert_eq!(rig.config().sensitivity, Vec2::new(0.1, 5.0));
    }

    #[test]
    fn test_set_rotation_snaps_and_clamps() {
        let mut rig = rig();
        rig.set_rotation(270.0, 80.0);
        let s = rig.state();
        assert_eq!(s.yaw, -90.0);
        assert_eq!(s.target_yaw, -90.0);
        assert_eq!(s.pitch, 40.0);
    }

    #[test]
    fn test_smoothing_style_sets_rotation_smooth_time() {
        let mut rig = rig();
        rig.set_smoothing_style(0.3);
        assert_eq!(
            rig.config().damping.rotation,
            crate::camera::damping::DampingMode::Critical { smooth_time: 0.3 }
        );
        rig.set_smoothing_style(5.0);
        assert_eq!(
            rig.config().damping.rotation,
            crate::camera::damping::DampingMode::Critical { smooth_time: 0.5 }
        );
    }

    #[test]
    fn test_non_finite_input_is_ignored() {
        let mut rig = rig();
        let input = CameraInput {
            pointer_delta: Vec2::new(f32::NAN, 0.0),
            pointer_drag: true,
            scroll_delta: f32::INFINITY,
            rotate_keys: Vec2::new(f32::NAN, f32::NAN),
            zoom_keys: f32::NAN,
        };
        let t = rig.advance(&input, &mut at_origin(), &EmptyWorld, DT);
        assert!(t.is_finite());
        assert_eq!(rig.state().target_distance, 5.0);
    }

    #[test]
    fn test_look_ahead_leads_moving_target() {
        let mut rig = CameraRig::new(RigConfig::default().with_look_ahead(true));
        rig.set_target(Some(TargetHandle(1)));
        let mut registry = OnePose {
            pose: Some(TargetPose::new(Vec3::ZERO, Vec3::NEG_Z).with_velocity(Vec3::new(0.0, 0.0, -7.0))),
            visible: Vec::new(),
        };
        for _ in 0..240 {
            rig.advance(&CameraInput::default(), &mut registry, &EmptyWorld, DT);
        }
        // Pivot pulled ~2m ahead along -Z
        let t = rig.transform();
        assert!((t.position.z - (5.0 - 2.0)).abs() < 0.05);
    }
}
