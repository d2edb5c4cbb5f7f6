//! Camera Console Commands
//!
//! Text commands that drive the camera rig's external API:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `/fov <deg>` | third-person field of view |
//! | `/console camerafov <deg>` | same as `/fov` |
//! | `/console camerasmoothstyle <1-10>` | rotation smoothing, tenths of a second |
//! | `/console cameradistance <d>` | zoom distance |
//! | `/console camerasensitivity <x> [y]` | pointer sensitivity |
//! | `/console camerarotation <yaw> <pitch>` | orbit angles in degrees |
//! | `/console camerareset` | back to defaults |
//!
//! Command names are case-insensitive. Out-of-range values are clamped by the
//! rig, never rejected.

use log::info;
use thiserror::Error;

use crate::camera::CameraRig;

/// Errors from parsing a console line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsoleError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} expects {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("not a number: {0}")]
    InvalidNumber(String),
}

/// A parsed camera command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCommand {
    FieldOfView(f32),
    /// Raw style value; the rig receives a tenth of it in seconds
    SmoothingStyle(f32),
    Distance(f32),
    Sensitivity { x: f32, y: f32 },
    Rotation { yaw: f32, pitch: f32 },
    Reset,
}

impl ConsoleCommand {
    /// Parse one console line.
    pub fn parse(line: &str) -> Result<Self, ConsoleError> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(ConsoleError::Empty);
        };
        let args: Vec<&str> = parts.collect();

        match head.to_ascii_lowercase().as_str() {
            "/fov" => Ok(ConsoleCommand::FieldOfView(number(&args, 0, "/fov", "<degrees>")?)),
            "/console" => {
                let Some(name) = args.first() else {
                    return Err(ConsoleError::MissingArgument {
                        command: "/console".to_string(),
                        expected: "a camera setting",
                    });
                };
                parse_setting(&name.to_ascii_lowercase(), &args[1..])
            }
            _ => Err(ConsoleError::UnknownCommand(head.to_string())),
        }
    }

    /// Apply to `rig` through its external API.
    pub fn apply(self, rig: &mut CameraRig) {
        match self {
            ConsoleCommand::FieldOfView(fov) => rig.set_field_of_view(fov),
            ConsoleCommand::SmoothingStyle(style) => rig.set_smoothing_style(style * 0.1),
            ConsoleCommand::Distance(distance) => rig.set_distance(distance),
            ConsoleCommand::Sensitivity { x, y } => rig.set_sensitivity(x, y),
            ConsoleCommand::Rotation { yaw, pitch } => rig.set_rotation(yaw, pitch),
            ConsoleCommand::Reset => rig.reset_to_defaults(),
        }
    }
}

fn parse_setting(name: &str, args: &[&str]) -> Result<ConsoleCommand, ConsoleError> {
    match name {
        "camerafov" => Ok(ConsoleCommand::FieldOfView(number(args, 0, name, "<degrees>")?)),
        "camerasmoothstyle" => Ok(ConsoleCommand::SmoothingStyle(number(args, 0, name, "<1-10>")?)),
        "cameradistance" => Ok(ConsoleCommand::Distance(number(args, 0, name, "<distance>")?)),
        "camerasensitivity" => {
            let x = number(args, 0, name, "<x> [y]")?;
            let y = match args.get(1) {
                Some(_) => number(args, 1, name, "<x> [y]")?,
                None => x,
            };
            Ok(ConsoleCommand::Sensitivity { x, y })
        }
        "camerarotation" => Ok(ConsoleCommand::Rotation {
            yaw: number(args, 0, name, "<yaw> <pitch>")?,
            pitch: number(args, 1, name, "<yaw> <pitch>")?,
        }),
        "camerareset" => Ok(ConsoleCommand::Reset),
        _ => Err(ConsoleError::UnknownCommand(name.to_string())),
    }
}

fn number(
    args: &[&str],
    index: usize,
    command: &str,
    expected: &'static str,
) -> Result<f32, ConsoleError> {
    let raw = args.get(index).ok_or_else(|| ConsoleError::MissingArgument {
        command: command.to_string(),
        expected,
    })?;
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConsoleError::InvalidNumber(raw.to_string()))
}

/// Parse `line` and apply it to `rig`.
pub fn execute(line: &str, rig: &mut CameraRig) -> Result<ConsoleCommand, ConsoleError> {
    let command = ConsoleCommand::parse(line)?;
    command.apply(rig);
    info!("Console: {}", line.trim());
    Ok(command)
}
