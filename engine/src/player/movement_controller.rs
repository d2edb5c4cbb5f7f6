//! Player Movement Controller
//!
//! Ground/air movement state machine for a kinematic character.
//! Movement direction is relative to the camera's flattened yaw unless a
//! modifier says otherwise.
//!
//! # Movement Model
//!
//! - Forward speed: 7.0 m/s, strafe 6.5 m/s, backward 4.5 m/s
//! - Grounded: horizontal velocity snaps to `direction * speed` (no inertia)
//! - Airborne: velocity is kept, and only steered (acceleration limited) while
//!   there is input, so jumps keep their take-off momentum
//! - Jump: launch speed `sqrt(2 * jump_height * |gravity|)`
//! - Gravity: -19.62 m/s², terminal velocity -53 m/s, grounded stick -2 m/s
//!
//! # Usage
//!
//! ```rust,ignore
//! use orbit_rig_engine::player::{MovementController, MovementInput};
//!
//! let mut controller = MovementController::new();
//!
//! // Each frame, after the camera has settled its yaw:
//! let moved = controller.tick(dt, &input, &camera.basis(), &mut body, &world);
//! ```

use glam::{Quat, Vec2, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::camera::rig::CameraBasis;
use crate::physics::body::KinematicBody;
use crate::physics::collision::{CollisionWorld, LayerMask};
use crate::physics::types::yaw_of_direction;

/// Forward speed in meters per second
pub const WALK_SPEED: f32 = 7.0;

/// Strafe speed in meters per second
pub const STRAFE_SPEED: f32 = 6.5;

/// Backward speed in meters per second
pub const BACKWARD_SPEED: f32 = 4.5;

/// Jump apex height in meters
pub const JUMP_HEIGHT: f32 = 2.0;

/// Gravity acceleration in meters per second squared (negative = down)
pub const GRAVITY: f32 = -19.62;

/// Fastest allowed fall in meters per second (negative = down)
pub const TERMINAL_VELOCITY: f32 = -53.0;

/// Vertical speed held while grounded, keeping the body seated on the ground
pub const GROUNDED_STICK_VELOCITY: f32 = -2.0;

/// Tunables for [`MovementController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub walk_speed: f32,
    pub strafe_speed: f32,
    pub backward_speed: f32,

    pub jump_height: f32,
    /// Extra horizontal speed along the input direction at take-off (m/s)
    pub jump_boost: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub grounded_stick_velocity: f32,

    /// Fraction of `air_acceleration` available while airborne, in `[0, 1]`
    pub air_control: f32,
    /// Horizontal steering acceleration at full air control (m/s²)
    pub air_acceleration: f32,
    /// Cap on steered horizontal speed while airborne (m/s)
    pub max_air_speed: f32,
    /// Speed bonus on air steering targets at full jump momentum (0.1 = 10%)
    pub jump_momentum_bonus: f32,
    /// Jump momentum lost per second while airborne
    pub jump_momentum_decay: f32,

    /// Slerp factor per second when turning toward the movement direction
    pub turn_rate: f32,

    /// Collision sphere radius of the character's body
    pub body_radius: f32,
    /// Radius of the ground probe, independent of the body
    pub ground_check_radius: f32,
    /// How far below the feet the ground probe reaches
    pub ground_check_offset: f32,
    /// Layers that count as ground (everything but the player by default)
    pub ground_mask: LayerMask,

    pub autorun_toggle_cooldown: f32,
    /// Axis magnitude above which directional input cancels autorun
    pub input_threshold: f32,
    /// `dot(direction, facing)` below this is backward movement
    pub backward_dot: f32,
    /// `|dot(direction, right)|` above this is strafing
    pub strafe_dot: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            strafe_speed: STRAFE_SPEED,
            backward_speed: BACKWARD_SPEED,
            jump_height: JUMP_HEIGHT,
            jump_boost: 0.0,
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            grounded_stick_velocity: GROUNDED_STICK_VELOCITY,
            air_control: 0.3,
            air_acceleration: 20.0,
            max_air_speed: WALK_SPEED * 1.1,
            jump_momentum_bonus: 0.1,
            jump_momentum_decay: 2.0,
            turn_rate: 10.0,
            body_radius: 0.4,
            ground_check_radius: 0.4,
            ground_check_offset: 0.1,
            ground_mask: LayerMask::default(),
            autorun_toggle_cooldown: 0.2,
            input_threshold: 0.1,
            backward_dot: -0.5,
            strafe_dot: 0.7,
        }
    }
}

impl MovementConfig {
    /// Vertical launch speed for `jump_height` under `gravity`.
    pub fn launch_velocity(&self) -> f32 {
        (2.0 * self.jump_height.max(0.0) * self.gravity.abs()).sqrt()
    }

    /// Copy with non-finite values restored and ranges enforced.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let fix = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };
        Self {
            walk_speed: fix(self.walk_speed, d.walk_speed).max(0.0),
            strafe_speed: fix(self.strafe_speed, d.strafe_speed).max(0.0),
            backward_speed: fix(self.backward_speed, d.backward_speed).max(0.0),
            jump_height: fix(self.jump_height, d.jump_height).max(0.0),
            jump_boost: fix(self.jump_boost, d.jump_boost).max(0.0),
            gravity: fix(self.gravity, d.gravity).min(0.0),
            terminal_velocity: fix(self.terminal_velocity, d.terminal_velocity).min(0.0),
            grounded_stick_velocity: fix(self.grounded_stick_velocity, d.grounded_stick_velocity)
                .min(0.0),
            air_control: fix(self.air_control, d.air_control).clamp(0.0, 1.0),
            air_acceleration: fix(self.air_acceleration, d.air_acceleration).max(0.0),
            max_air_speed: fix(self.max_air_speed, d.max_air_speed).max(0.0),
            jump_momentum_bonus: fix(self.jump_momentum_bonus, d.jump_momentum_bonus).max(0.0),
            jump_momentum_decay: fix(self.jump_momentum_decay, d.jump_momentum_decay).max(0.0),
            turn_rate: fix(self.turn_rate, d.turn_rate).max(0.0),
            body_radius: fix(self.body_radius, d.body_radius).max(0.01),
            ground_check_radius: fix(self.ground_check_radius, d.ground_check_radius).max(0.0),
            ground_check_offset: fix(self.ground_check_offset, d.ground_check_offset),
            ground_mask: self.ground_mask,
            autorun_toggle_cooldown: fix(self.autorun_toggle_cooldown, d.autorun_toggle_cooldown)
                .max(0.0),
            input_threshold: fix(self.input_threshold, d.input_threshold).clamp(0.0, 1.0),
            backward_dot: fix(self.backward_dot, d.backward_dot).clamp(-1.0, 1.0),
            strafe_dot: fix(self.strafe_dot, d.strafe_dot).clamp(0.0, 1.0),
        }
    }
}

/// Movement input for one tick, already mapped from devices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementInput {
    /// x: strafe (+1 right), y: forward (+1 forward)
    pub axes: Vec2,
    /// Jump pressed this frame (edge)
    pub jump_pressed: bool,
    /// Autorun toggle pressed this frame (edge)
    pub autorun_toggle_pressed: bool,
    /// Move relative to the character's own facing instead of the camera
    pub free_look_held: bool,
    /// Turn the character to the camera's yaw
    pub rotate_with_camera_held: bool,
    /// Both primary pointer buttons: run forward along the facing
    pub both_buttons_held: bool,
}

/// Ground/air state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundState {
    #[default]
    Grounded,
    Airborne,
}

/// Per-character movement state, mutated once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementState {
    /// Horizontal velocity (y is always 0)
    pub horizontal_velocity: Vec3,
    /// Vertical speed, positive up
    pub vertical_velocity: f32,
    pub is_grounded: bool,
    pub is_autorunning: bool,
    /// 1.0 at take-off, decays to 0 in the air, reset on landing
    pub jump_momentum: f32,
}

/// Ground/air movement controller with camera-relative input.
///
/// The controller never owns the body. Each [`tick`](Self::tick) it checks
/// the ground, resolves a direction and speed, integrates gravity, and commits
/// one move through [`KinematicBody`].
#[derive(Debug, Clone)]
pub struct MovementController {
    config: MovementConfig,
    state: MovementState,

    /// Character facing (rotation about Y)
    facing: Quat,

    /// Time until the autorun key is accepted again
    autorun_cooldown: f32,

    /// Actual displacement of the last tick divided by dt
    velocity: Vec3,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::with_config(MovementConfig::default())
    }
}

impl MovementController {
    /// Create a new movement controller with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a movement controller with custom settings (sanitized).
    pub fn with_config(config: MovementConfig) -> Self {
        Self {
            config: config.sanitized(),
            state: MovementState {
                is_grounded: true,
                ..Default::default()
            },
            facing: Quat::IDENTITY,
            autorun_cooldown: 0.0,
            velocity: Vec3::ZERO,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MovementConfig) {
        self.config = config.sanitized();
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    /// Velocity the body actually moved at during the last tick.
    pub fn get_velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn get_vertical_velocity(&self) -> f32 {
        self.state.vertical_velocity
    }

    pub fn get_horizontal_velocity(&self) -> Vec3 {
        self.state.horizontal_velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded
    }

    pub fn ground_state(&self) -> GroundState {
        if self.state.is_grounded {
            GroundState::Grounded
        } else {
            GroundState::Airborne
        }
    }

    pub fn is_autorunning(&self) -> bool {
        self.state.is_autorunning
    }

    /// Character facing rotation.
    pub fn facing(&self) -> Quat {
        self.facing
    }

    /// Unit forward of the facing.
    pub fn forward(&self) -> Vec3 {
        self.facing * Vec3::NEG_Z
    }

    /// Unit right of the facing.
    pub fn right(&self) -> Vec3 {
        self.facing * Vec3::X
    }

    /// Facing yaw in degrees.
    pub fn facing_yaw(&self) -> f32 {
        yaw_of_direction(self.forward()).unwrap_or(0.0)
    }

    /// Face `yaw_degrees` immediately.
    pub fn set_facing_yaw(&mut self, yaw_degrees: f32) {
        if yaw_degrees.is_finite() {
            self.facing = facing_from_yaw(yaw_degrees);
        }
    }

    /// Overwrite the movement state (e.g. after a teleport).
    pub fn set_state(&mut self, state: MovementState) {
        self.state = state;
    }

    /// Stop all motion and clear autorun.
    pub fn reset(&mut self) {
        self.state = MovementState {
            is_grounded: self.state.is_grounded,
            ..Default::default()
        };
        self.autorun_cooldown = 0.0;
        self.velocity = Vec3::ZERO;
    }

    /// Advance one tick and move `body`.
    ///
    /// `camera` must be this frame's camera basis. Returns the displacement the
    /// body actually made.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &MovementInput,
        camera: &CameraBasis,
        body: &mut dyn KinematicBody,
        world: &dyn CollisionWorld,
    ) -> Vec3 {
        if !dt.is_finite() || dt <= 0.0 {
            return Vec3::ZERO;
        }
        let axes = if input.axes.is_finite() {
            input.axes.clamp(Vec2::NEG_ONE, Vec2::ONE)
        } else {
            Vec2::ZERO
        };

        self.update_ground_state(body.position(), world);
        self.update_autorun(input, axes, dt);

        // Turning with the camera happens first so movement uses the new facing
        if input.rotate_with_camera_held && !input.both_buttons_held {
            self.facing = facing_from_yaw(camera.yaw);
        }

        let direction = self.resolve_direction(input, axes, camera);
        let speed = self.select_speed(direction);

        if self.state.is_grounded {
            self.state.horizontal_velocity = direction * speed;
        } else {
            self.steer_in_air(direction, speed, dt);
        }

        let modifier = input.free_look_held || input.rotate_with_camera_held || input.both_buttons_held;
        let raw_input = axes.x.abs() > f32::EPSILON || axes.y.abs() > f32::EPSILON;
        if !modifier && raw_input {
            self.turn_toward(direction, dt);
        }

        self.apply_gravity(dt);
        if input.jump_pressed && self.state.is_grounded {
            self.jump(direction);
        }
        if !self.state.is_grounded && self.state.jump_momentum > 0.0 {
            self.state.jump_momentum =
                (self.state.jump_momentum - self.config.jump_momentum_decay * dt).clamp(0.0, 1.0);
        }

        // Commit
        let requested = (self.state.horizontal_velocity + Vec3::Y * self.state.vertical_velocity) * dt;
        let moved = body.apply_kinematic_move(requested, world);
        let moved = if moved.is_finite() { moved } else { Vec3::ZERO };

        // Head hit something on the way up
        if self.state.vertical_velocity > 0.0 && requested.y > 1e-5 && moved.y < requested.y * 0.5 {
            debug!("Ceiling hit, cancelling upward velocity");
            self.state.vertical_velocity = 0.0;
        }

        self.velocity = moved / dt;
        moved
    }

    /// Ground probe at the feet, ignored while rising.
    fn update_ground_state(&mut self, position: Vec3, world: &dyn CollisionWorld) {
        let was_grounded = self.state.is_grounded;
        // Probe sphere rests on the feet, sunk `ground_check_offset` below them
        let radius = self.config.ground_check_radius;
        let probe = position + Vec3::Y * (radius - self.config.ground_check_offset);
        self.state.is_grounded = self.state.vertical_velocity <= 0.0
            && world.query_shape_overlap(probe, radius, self.config.ground_mask);

        if self.state.is_grounded && !was_grounded {
            debug!("Landed at {:?}", position);
            self.state.jump_momentum = 0.0;
        }
    }

    fn update_autorun(&mut self, input: &MovementInput, axes: Vec2, dt: f32) {
        self.autorun_cooldown = (self.autorun_cooldown - dt).max(0.0);
        if input.autorun_toggle_pressed && self.autorun_cooldown <= 0.0 {
            self.state.is_autorunning = !self.state.is_autorunning;
            self.autorun_cooldown = self.config.autorun_toggle_cooldown;
            debug!("Autorun {}", if self.state.is_autorunning { "on" } else { "off" });
        }

        let threshold = self.config.input_threshold;
        if self.state.is_autorunning && (axes.x.abs() > threshold || axes.y.abs() > threshold) {
            self.state.is_autorunning = false;
            debug!("Autorun cancelled by movement input");
        }
    }

    /// Horizontal unit-or-shorter movement direction for this tick.
    fn resolve_direction(&self, input: &MovementInput, axes: Vec2, camera: &CameraBasis) -> Vec3 {
        let direction = if input.both_buttons_held || self.state.is_autorunning {
            self.forward()
        } else if input.free_look_held {
            self.forward() * axes.y + self.right() * axes.x
        } else {
            camera.forward * axes.y + camera.right * axes.x
        };
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.is_finite() {
            flat.clamp_length_max(1.0)
        } else {
            Vec3::ZERO
        }
    }

    /// Forward, strafe or backward speed depending on direction vs facing.
    fn select_speed(&self, direction: Vec3) -> f32 {
        if direction.length_squared() < 1e-8 {
            return 0.0;
        }
        let heading = direction.normalize();
        if heading.dot(self.forward()) < self.config.backward_dot {
            self.config.backward_speed
        } else if heading.dot(self.right()).abs() > self.config.strafe_dot {
            self.config.strafe_speed
        } else {
            self.config.walk_speed
        }
    }

    /// Acceleration-limited steering. Without input the velocity is untouched.
    fn steer_in_air(&mut self, direction: Vec3, speed: f32, dt: f32) {
        if direction.length_squared() < 1e-8 {
            return;
        }
        let bonus = 1.0 + self.config.jump_momentum_bonus * self.state.jump_momentum;
        let target = direction * speed * bonus;
        let max_change = self.config.air_acceleration * self.config.air_control * dt;

        let current = self.state.horizontal_velocity;
        let steered = current + (target - current).clamp_length_max(max_change);
        self.state.horizontal_velocity = steered.clamp_length_max(self.config.max_air_speed);
    }

    /// Slerp the facing toward `direction`.
    fn turn_toward(&mut self, direction: Vec3, dt: f32) {
        let Some(yaw) = yaw_of_direction(direction) else {
            return;
        };
        let t = (dt * self.config.turn_rate).clamp(0.0, 1.0);
        self.facing = self.facing.slerp(facing_from_yaw(yaw), t).normalize();
    }

    fn apply_gravity(&mut self, dt: f32) {
        let state = &mut self.state;
        if state.is_grounded && state.vertical_velocity <= 0.0 {
            state.vertical_velocity = self.config.grounded_stick_velocity;
        } else {
            state.vertical_velocity = (state.vertical_velocity + self.config.gravity * dt)
                .max(self.config.terminal_velocity);
        }
    }

    fn jump(&mut self, direction: Vec3) {
        self.state.vertical_velocity = self.config.launch_velocity();
        if self.config.jump_boost > 0.0 {
            self.state.horizontal_velocity += direction.normalize_or_zero() * self.config.jump_boost;
        }
        self.state.is_grounded = false;
        self.state.jump_momentum = 1.0;
        debug!("Jump, launch velocity {:.2} m/s", self.state.vertical_velocity);
    }
}

#[inline]
fn facing_from_yaw(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians())
}
