//! Frame Pipeline
//!
//! One cooperative update pass per rendered frame, in a fixed order:
//!
//! 1. camera orientation (input, damped yaw/pitch/distance)
//! 2. character movement against this frame's camera basis, committed to the body
//! 3. camera follow on the committed pose (pivot, collision, mode, FOV)
//!
//! The camera never samples a half-updated character, and movement never
//! reads last frame's camera yaw.

use std::time::Instant;

use glam::Vec3;
use log::debug;

use crate::camera::{CameraRig, CameraTransform, RigConfig, TargetHandle, TargetPose, TargetRegistry};
use crate::input::{InputSource, KeyBindings};
use crate::physics::{CollisionWorld, KinematicBody, SweptBody};
use crate::player::{MovementConfig, MovementController};
use crate::settings::Settings;

/// Longest frame the pipeline will simulate in one step (seconds).
/// Hitches beyond this are slowed down instead of tunnelling.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Handle the pipeline gives its own character.
pub const PLAYER_HANDLE: TargetHandle = TargetHandle(1);

// =============================================================================
// Clocks
// =============================================================================

/// Source of frame delta time.
pub trait FrameClock {
    /// Seconds since the previous call (0 on the first call for real clocks).
    fn elapsed(&mut self) -> f32;
}

/// Clock that always reports the same step. Used by tests and the simulator.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub step: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step }
    }

    /// Clock ticking at `hz` frames per second.
    pub fn from_hz(hz: f32) -> Self {
        Self { step: 1.0 / hz.max(1.0) }
    }
}

impl FrameClock for FixedClock {
    fn elapsed(&mut self) -> f32 {
        self.step
    }
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for SystemClock {
    fn elapsed(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        dt
    }
}

// =============================================================================
// Character
// =============================================================================

/// The controlled character: a swept body driven by a movement controller.
///
/// Acts as the camera's target registry for its own handle.
#[derive(Debug, Clone)]
pub struct Character {
    pub handle: TargetHandle,
    pub body: SweptBody,
    pub controller: MovementController,
    visible: bool,
}

impl Character {
    pub fn new(handle: TargetHandle, position: Vec3, config: MovementConfig) -> Self {
        Self {
            handle,
            body: SweptBody::with_radius(position, config.body_radius),
            controller: MovementController::with_config(config),
            visible: true,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.body.position()
    }

    /// Whether the character's own visuals are shown (false in first person).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn pose(&self) -> TargetPose {
        TargetPose::new(self.body.position(), self.controller.forward())
            .with_velocity(self.controller.get_velocity())
    }
}

impl TargetRegistry for Character {
    fn target_pose(&self, handle: TargetHandle) -> Option<TargetPose> {
        (handle == self.handle).then(|| self.pose())
    }

    fn set_target_visible(&mut self, handle: TargetHandle, visible: bool) {
        if handle == self.handle && self.visible != visible {
            debug!("Character visuals {}", if visible { "shown" } else { "hidden" });
            self.visible = visible;
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// What one frame produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub camera: CameraTransform,
    pub character_position: Vec3,
    /// Displacement the body actually made this frame
    pub moved: Vec3,
    /// Delta time actually simulated
    pub dt: f32,
}

/// Camera rig, character and bindings updated as one unit.
#[derive(Debug, Clone)]
pub struct FramePipeline {
    pub rig: CameraRig,
    pub character: Character,
    pub bindings: KeyBindings,
}

impl FramePipeline {
    /// Pipeline with a character at `spawn`, tracked by a rig built from `camera`.
    pub fn new(camera: RigConfig, movement: MovementConfig, bindings: KeyBindings, spawn: Vec3) -> Self {
        let mut rig = CameraRig::new(camera);
        rig.set_target(Some(PLAYER_HANDLE));
        Self {
            rig,
            character: Character::new(PLAYER_HANDLE, spawn, movement.sanitized()),
            bindings: bindings.sanitized(),
        }
    }

    pub fn from_settings(settings: &Settings, spawn: Vec3) -> Self {
        Self::new(
            settings.camera,
            settings.movement,
            settings.bindings.clone(),
            spawn,
        )
    }

    /// Run one frame with `dt` seconds.
    ///
    /// `dt` is clamped to `[0, MAX_FRAME_DELTA]`; a non-finite `dt` runs a
    /// zero-length frame that still re-commits the camera transform.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &dyn InputSource,
        world: &dyn CollisionWorld,
    ) -> FrameOutput {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DELTA) } else { 0.0 };

        // 1. Camera orientation
        let camera_input = self.bindings.camera_input(input);
        self.rig.advance_orientation(&camera_input, dt);

        // 2. Movement, committed to the body
        let basis = self.rig.basis();
        let movement_input = self.bindings.movement_input(input);
        let Character {
            body, controller, ..
        } = &mut self.character;
        let moved = controller.tick(dt, &movement_input, &basis, body, world);

        // 3. Camera follow on the committed pose
        let camera = self.rig.advance_follow(&mut self.character, world, dt);

        FrameOutput {
            camera,
            character_position: self.character.position(),
            moved,
            dt,
        }
    }

    /// Run one frame timed by `clock`.
    pub fn run_frame(
        &mut self,
        clock: &mut dyn FrameClock,
        input: &dyn InputSource,
        world: &dyn CollisionWorld,
    ) -> FrameOutput {
        let dt = clock.elapsed();
        self.tick(dt, input, world)
    }
}
