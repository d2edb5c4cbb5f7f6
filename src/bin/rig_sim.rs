//! Rig Simulator - Headless Camera/Movement Run
//!
//! Run with: `cargo run --bin rig_sim [settings.json]`
//!
//! Drives the frame pipeline through a scripted input timeline at a fixed
//! 60 Hz and logs where the character and camera end up. Set `RUST_LOG=debug`
//! to also see mode switches, landings and clamped settings.
//!
//! Timeline:
//! - walk forward toward a pillar
//! - right-drag to swing the camera and character around
//! - jump while strafing
//! - back up against a wall so the camera has to pull in
//! - scroll into first person and back out
//! - console tweaks, then a camera reset

use glam::Vec3;
use log::{error, info};

use orbit_rig_engine::console;
use orbit_rig_engine::frame::{FixedClock, FramePipeline};
use orbit_rig_engine::input::{InputState, KeyCode, MouseButton, ScrollDelta};
use orbit_rig_engine::physics::StaticWorld;
use orbit_rig_engine::settings::Settings;

const FRAME_RATE: f32 = 60.0;
const DURATION_S: f32 = 14.0;
const LOG_EVERY_FRAMES: u32 = 30;

/// One scripted input event.
#[derive(Debug, Clone, Copy)]
enum Event {
    Key(KeyCode, bool),
    Button(MouseButton, bool),
    Motion(f32, f32),
    Scroll(f32),
    Console(&'static str),
}

/// (time in seconds, event)
const TIMELINE: &[(f32, Event)] = &[
    (0.5, Event::Key(KeyCode::W, true)),
    (2.5, Event::Key(KeyCode::W, false)),
    (3.0, Event::Button(MouseButton::Right, true)),
    (3.1, Event::Motion(20.0, 0.0)),
    (3.3, Event::Motion(20.0, 4.0)),
    (3.5, Event::Motion(20.0, 0.0)),
    (4.0, Event::Button(MouseButton::Right, false)),
    (4.5, Event::Key(KeyCode::D, true)),
    (4.6, Event::Key(KeyCode::Space, true)),
    (4.7, Event::Key(KeyCode::Space, false)),
    (5.5, Event::Key(KeyCode::D, false)),
    (6.0, Event::Key(KeyCode::S, true)),
    (8.0, Event::Key(KeyCode::S, false)),
    (8.5, Event::Scroll(10.0)),
    (9.5, Event::Scroll(-3.0)),
    (10.5, Event::Console("/console camerasmoothstyle 3")),
    (10.6, Event::Console("/fov 85")),
    (11.0, Event::Key(KeyCode::NumLock, true)),
    (11.1, Event::Key(KeyCode::NumLock, false)),
    (12.5, Event::Key(KeyCode::W, true)),
    (12.6, Event::Key(KeyCode::W, false)),
    (13.0, Event::Console("/console camerareset")),
];

/// Ground, two walls and a pillar around the spawn point.
fn build_world() -> StaticWorld {
    let mut world = StaticWorld::new();
    world
        .add_ground_plane(0.0)
        // Wall behind the spawn point (+Z)
        .add_box(Vec3::new(-10.0, 0.0, 4.0), Vec3::new(10.0, 4.0, 5.0))
        // Wall to the right (+X)
        .add_box(Vec3::new(8.0, 0.0, -20.0), Vec3::new(9.0, 4.0, 5.0))
        // Pillar ahead
        .add_box(Vec3::new(-0.75, 0.0, -12.0), Vec3::new(0.75, 6.0, -10.5));
    world
}

fn load_settings() -> Settings {
    let Some(path) = std::env::args().nth(1) else {
        return Settings::default();
    };
    match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}; using default settings");
            Settings::default()
        }
    }
}

fn apply_event(event: Event, input: &mut InputState, pipeline: &mut FramePipeline) {
    match event {
        Event::Key(key, pressed) => input.keyboard.handle_key(key, pressed),
        Event::Button(button, pressed) => input.mouse.set_button(button, pressed),
        Event::Motion(dx, dy) => input.mouse.add_motion(dx, dy),
        Event::Scroll(lines) => input.mouse.add_scroll(ScrollDelta::from_lines(0.0, lines)),
        Event::Console(line) => {
            if let Err(e) = console::execute(line, &mut pipeline.rig) {
                error!("Console '{}': {}", line, e);
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = load_settings();
    let world = build_world();
    let mut pipeline = FramePipeline::from_settings(&settings, Vec3::ZERO);
    let mut clock = FixedClock::from_hz(FRAME_RATE);
    let mut input = InputState::new();

    info!("Simulating {:.1}s at {} Hz", DURATION_S, FRAME_RATE);

    let frames = (DURATION_S * FRAME_RATE) as u32;
    let mut next_event = 0;
    for frame in 0..frames {
        let time = frame as f32 / FRAME_RATE;
        while let Some(&(at, event)) = TIMELINE.get(next_event) {
            if at > time {
                break;
            }
            apply_event(event, &mut input, &mut pipeline);
            next_event += 1;
        }

        let out = pipeline.run_frame(&mut clock, &input, &world);
        input.end_frame();

        if frame % LOG_EVERY_FRAMES == 0 {
            let state = pipeline.rig.state();
            info!(
                "t={:5.2}s char=({:6.2}, {:5.2}, {:6.2}) {} cam=({:6.2}, {:5.2}, {:6.2}) yaw={:7.2} pitch={:6.2} dist={:5.2}/{:5.2} {:?} fov={:5.1}",
                time,
                out.character_position.x,
                out.character_position.y,
                out.character_position.z,
                if pipeline.character.controller.is_grounded() { "ground" } else { "air   " },
                out.camera.position.x,
                out.camera.position.y,
                out.camera.position.z,
                state.yaw,
                state.pitch,
                state.collision_distance,
                state.distance,
                state.mode,
                out.camera.fov,
            );
        }
    }

    let state = pipeline.rig.state();
    info!(
        "Done: character at {:?}, camera {:?} at distance {:.2}, autorun {}",
        pipeline.character.position(),
        state.mode,
        state.distance,
        pipeline.character.controller.is_autorunning(),
    );
}
