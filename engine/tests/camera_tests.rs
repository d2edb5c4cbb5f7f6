//! Camera Tests - Orbit Rig Behaviour
//!
//! Exercises the camera rig through its public API: clamping under extreme
//! input, angular wrap, mode switching, collision bounds and reset.

use glam::{Vec2, Vec3};
use orbit_rig_engine::camera::{
    CameraCollisionConfig, CameraInput, CameraMode, CameraRig, CollisionRecovery, RigConfig,
    RigPreset, TargetHandle, TargetPose, TargetRegistry, delta_angle,
};
use orbit_rig_engine::physics::{EmptyWorld, StaticWorld};

const DT: f32 = 1.0 / 60.0;
const TARGET: TargetHandle = TargetHandle(7);

// ============================================================================
// Helpers
// ============================================================================

/// Registry holding one target and recording visibility writes.
struct Scene {
    pose: TargetPose,
    visibility: Vec<bool>,
}

impl Scene {
    fn at(position: Vec3) -> Self {
        Self {
            pose: TargetPose::new(position, Vec3::NEG_Z),
            visibility: Vec::new(),
        }
    }
}

impl TargetRegistry for Scene {
    fn target_pose(&self, handle: TargetHandle) -> Option<TargetPose> {
        (handle == TARGET).then_some(self.pose)
    }

    fn set_target_visible(&mut self, _handle: TargetHandle, visible: bool) {
        self.visibility.push(visible);
    }
}

fn rig(config: RigConfig) -> CameraRig {
    let mut rig = CameraRig::new(config);
    rig.set_target(Some(TARGET));
    rig
}

/// Small deterministic generator for input sequences.
struct Lcg(u32);

impl Lcg {
    /// Uniform in [-1, 1].
    fn next(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 8) as f32 / (1u32 << 23) as f32 - 1.0
    }
}

// ============================================================================
// Clamping
// ============================================================================

#[test]
fn test_distance_stays_in_range_under_extreme_zoom() {
    for preset in [RigPreset::Classic, RigPreset::Advanced] {
        let mut rig = rig(RigConfig::preset(preset));
        let config = *rig.config();
        let mut rng = Lcg(11);

        for i in 0..600 {
            let scroll = match i % 7 {
                0 => 1.0e6,
                1 => -1.0e6,
                2 => f32::NAN,
                _ => rng.next() * 50.0,
            };
            let input = CameraInput {
                scroll_delta: scroll,
                zoom_keys: rng.next() * 3.0,
                ..Default::default()
            };
            rig.advance_orientation(&input, DT);

            let state = rig.state();
            assert!(state.distance >= config.min_distance && state.distance <= config.max_distance,
                "{preset:?}: distance {} out of range", state.distance);
            assert!(state.target_distance >= config.min_distance
                && state.target_distance <= config.max_distance);
        }
    }
}

#[test]
fn test_pitch_stays_in_range_under_extreme_rotation() {
    for preset in [RigPreset::Classic, RigPreset::Advanced] {
        let mut rig = rig(RigConfig::preset(preset));
        let config = *rig.config();
        let mut rng = Lcg(3);

        for i in 0..600 {
            let burst = if i % 50 == 0 { 1.0e5 } else { 40.0 };
            let input = CameraInput {
                pointer_delta: Vec2::new(rng.next(), rng.next()) * burst,
                pointer_drag: true,
                rotate_keys: Vec2::new(rng.next(), rng.next()) * 5.0,
                ..Default::default()
            };
            rig.advance_orientation(&input, DT);

            let state = rig.state();
            assert!(state.pitch >= config.min_pitch && state.pitch <= config.max_pitch,
                "{preset:?}: pitch {} out of range", state.pitch);
            assert!(state.yaw > -180.0 && state.yaw <= 180.0);
        }
    }
}

// ============================================================================
// Damping
// ============================================================================

#[test]
fn test_yaw_takes_short_way_across_180() {
    let mut rig = rig(RigConfig::default());
    rig.set_rotation(170.0, 0.0);

    // 8 px * 2.5 deg/px = +20 degrees
    let drag = CameraInput {
        pointer_delta: Vec2::new(8.0, 0.0),
        pointer_drag: true,
        ..Default::default()
    };
    let mut previous = rig.state().yaw;
    let mut travelled = 0.0;
    rig.advance_orientation(&drag, DT);
    for _ in 0..120 {
        let yaw = rig.state().yaw;
        assert!(yaw.abs() >= 170.0 - 1e-3, "went through zero: {yaw}");
        travelled += delta_angle(previous, yaw).abs();
        previous = yaw;
        rig.advance_orientation(&CameraInput::default(), DT);
    }

    assert!((rig.state().yaw + 170.0).abs() < 0.05);
    assert!(travelled <= 20.0 + 1e-2, "travelled {travelled}");
}

#[test]
fn test_fast_drag_never_turns_backwards() {
    for preset in [RigPreset::Classic, RigPreset::Advanced] {
        let mut rig = rig(RigConfig::preset(preset));
        let sensitivity = rig.config().sensitivity.x;
        // 4 px per frame is 288 deg/s on Advanced, past its 120 deg/s spring cap
        let drag = CameraInput {
            pointer_delta: Vec2::new(4.0, 0.0),
            pointer_drag: true,
            ..Default::default()
        };

        let mut previous = rig.state().yaw;
        let mut turned = 0.0;
        for frame in 0..180 {
            rig.advance_orientation(&drag, DT);
            let yaw = rig.state().yaw;
            let step = delta_angle(previous, yaw);
            assert!(step >= -1e-3, "{preset:?}: yaw stepped back {step} on frame {frame}");
            turned += step;
            previous = yaw;
        }

        let requested = 4.0 * sensitivity * 180.0;
        assert!(turned > 300.0 && turned <= requested + 1e-2, "{preset:?}: turned {turned}");
    }
}

#[test]
fn test_spring_rotation_converges() {
    let mut rig = rig(RigConfig::preset(RigPreset::Advanced));
    let turn = CameraInput {
        rotate_keys: Vec2::new(1.0, 0.0),
        ..Default::default()
    };
    for _ in 0..30 {
        rig.advance_orientation(&turn, DT);
    }

    let mut early_peak: f32 = 0.0;
    for _ in 0..60 {
        rig.advance_orientation(&CameraInput::default(), DT);
        let state = rig.state();
        early_peak = early_peak.max(delta_angle(state.yaw, state.target_yaw).abs());
    }
    let mut late_peak: f32 = 0.0;
    for _ in 0..120 {
        rig.advance_orientation(&CameraInput::default(), DT);
        let state = rig.state();
        late_peak = late_peak.max(delta_angle(state.yaw, state.target_yaw).abs());
    }

    assert!(late_peak < early_peak);
    assert!(late_peak < 0.05, "still oscillating: {late_peak}");
}

// ============================================================================
// Modes
// ============================================================================

#[test]
fn test_mode_flips_once_each_way() {
    let mut rig = rig(RigConfig::default());
    let mut scene = Scene::at(Vec3::ZERO);
    let mut modes = Vec::new();

    let steps: Vec<f32> = (0..=40).map(|i| 2.0 - i as f32 * 0.05).collect();
    for &distance in steps.iter().chain(steps.iter().rev()) {
        rig.set_distance(distance);
        rig.advance_follow(&mut scene, &EmptyWorld, DT);
        if modes.last() != Some(&rig.mode()) {
            modes.push(rig.mode());
        }
    }

    assert_eq!(
        modes,
        vec![CameraMode::ThirdPerson, CameraMode::FirstPerson, CameraMode::ThirdPerson]
    );
    // Initial sync, hide, show
    assert_eq!(scene.visibility, vec![true, false, true]);
}

#[test]
fn test_first_person_camera_sits_at_pivot() {
    let mut rig = rig(RigConfig::default());
    let mut scene = Scene::at(Vec3::new(3.0, 0.0, -2.0));
    rig.set_distance(0.0);

    let transform = rig.advance_follow(&mut scene, &EmptyWorld, DT);
    let pivot = Vec3::new(3.0, rig.config().pivot_height, -2.0);
    assert!((transform.position - pivot).length() < 1e-5);
}

// ============================================================================
// Collision
// ============================================================================

fn plane_rig(min_distance: f32) -> CameraRig {
    let config = RigConfig {
        pivot_height: 0.0,
        min_distance,
        ..RigConfig::default()
    }
    .with_collision(CameraCollisionConfig {
        radius: 0.0,
        buffer: 0.3,
        ..Default::default()
    });
    rig(config)
}

fn plane_world() -> StaticWorld {
    let mut world = StaticWorld::new();
    // Solid beyond z = 2, facing the pivot
    world.add_plane(Vec3::NEG_Z, -2.0);
    world
}

#[test]
fn test_obstruction_plane_resolves_to_buffered_distance() {
    let mut rig = plane_rig(0.0);
    let mut scene = Scene::at(Vec3::ZERO);

    let transform = rig.advance_follow(&mut scene, &plane_world(), DT);
    assert!((rig.state().collision_distance - 1.7).abs() < 1e-4);
    assert!((transform.position - Vec3::new(0.0, 0.0, 1.7)).length() < 1e-4);
    assert!(rig.last_collision().is_some_and(|c| c.is_obstructed()));
}

#[test]
fn test_obstruction_plane_floored_at_min_distance() {
    let mut rig = plane_rig(2.5);
    let mut scene = Scene::at(Vec3::ZERO);

    rig.advance_follow(&mut scene, &plane_world(), DT);
    assert!((rig.state().collision_distance - 2.5).abs() < 1e-4);
}

#[test]
fn test_collision_distance_bounded_while_orbiting_obstacles() {
    let config = RigConfig::preset(RigPreset::Advanced).with_shoulder_offset(0.0);
    let mut rig = rig(config);
    let mut scene = Scene::at(Vec3::ZERO);

    let mut world = StaticWorld::new();
    world
        .add_ground_plane(0.0)
        .add_box(Vec3::new(-6.0, 0.0, 3.0), Vec3::new(6.0, 3.0, 3.5))
        .add_box(Vec3::new(2.5, 0.0, -2.0), Vec3::new(3.5, 5.0, 2.0))
        .add_sphere(Vec3::new(-3.0, 2.0, -3.0), 1.0);

    let mut rng = Lcg(42);
    for _ in 0..900 {
        let input = CameraInput {
            pointer_delta: Vec2::new(rng.next() * 20.0, rng.next() * 5.0),
            pointer_drag: true,
            scroll_delta: rng.next() * 0.3,
            ..Default::default()
        };
        rig.advance(&input, &mut scene, &world, DT);

        let state = rig.state();
        assert!(state.collision_distance >= config.min_distance - 1e-4,
            "closer than min: {}", state.collision_distance);
        assert!(state.collision_distance <= state.distance + 1e-4,
            "farther than desired: {} > {}", state.collision_distance, state.distance);
        assert!(rig.transform().is_finite());
    }
}

#[test]
fn test_eased_recovery_after_obstruction_clears() {
    let config = RigConfig {
        pivot_height: 0.0,
        ..RigConfig::default()
    }
    .with_collision_recovery(CollisionRecovery::Ease { rate: 5.0 });
    let mut rig = rig(config);
    let mut scene = Scene::at(Vec3::ZERO);

    rig.advance_follow(&mut scene, &plane_world(), DT);
    let blocked = rig.state().collision_distance;
    assert!(blocked < 2.0);

    let mut previous = blocked;
    for _ in 0..30 {
        rig.advance_follow(&mut scene, &EmptyWorld, DT);
        let d = rig.state().collision_distance;
        assert!(d >= previous && d <= 5.0 + 1e-4);
        previous = d;
    }
    assert!(previous < 5.0, "eased recovery should take more than half a second");

    for _ in 0..300 {
        rig.advance_follow(&mut scene, &EmptyWorld, DT);
    }
    assert!((rig.state().collision_distance - 5.0).abs() < 1e-4);
}

// ============================================================================
// Missing target, reset
// ============================================================================

#[test]
fn test_missing_target_holds_last_transform() {
    let mut rig = rig(RigConfig::default());
    let mut scene = Scene::at(Vec3::ZERO);
    let held = rig.advance_follow(&mut scene, &EmptyWorld, DT);

    rig.set_target(Some(TargetHandle(99)));
    for _ in 0..10 {
        assert_eq!(rig.advance_follow(&mut scene, &EmptyWorld, DT), held);
    }

    rig.set_target(None);
    rig.advance_orientation(
        &CameraInput {
            rotate_keys: Vec2::ONE,
            ..Default::default()
        },
        DT,
    );
    assert_eq!(rig.advance_follow(&mut scene, &EmptyWorld, DT), held);
}

#[test]
fn test_reset_to_defaults_is_idempotent() {
    let mut rig = rig(RigConfig::preset(RigPreset::Advanced));
    let mut scene = Scene::at(Vec3::new(1.0, 0.0, 1.0));
    let mut rng = Lcg(5);
    for _ in 0..120 {
        let input = CameraInput {
            pointer_delta: Vec2::new(rng.next(), rng.next()) * 30.0,
            pointer_drag: true,
            scroll_delta: rng.next(),
            ..Default::default()
        };
        rig.advance(&input, &mut scene, &EmptyWorld, DT);
    }
    rig.set_field_of_view(95.0);
    rig.set_sensitivity(4.0, 4.0);

    rig.reset_to_defaults();
    let once = (rig.state(), *rig.config());
    rig.reset_to_defaults();
    let twice = (rig.state(), *rig.config());

    assert_eq!(once, twice);
    assert_eq!(once.1, RigConfig::preset(RigPreset::Advanced).sanitized());
    assert_eq!(once.0.pitch, once.1.default_pitch);
    assert_eq!(once.0.distance, once.1.default_distance);
}
