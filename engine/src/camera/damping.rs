//! Damped Tracker Module
//!
//! Drives a single scalar (distance, pitch) or angle (yaw) toward a setpoint.
//! Two interchangeable algorithms are provided:
//!
//! - **Critical damping**: exact closed-form solution of the critically damped
//!   second-order system `x'' = -2ω x' - ω² x`. Unconditionally stable for any
//!   `dt`, never overshoots.
//! - **Spring-damper**: `a = -k (x - target) - c v`, integrated with semi-implicit
//!   Euler. Velocity is clamped to a maximum rate, and large frames are split
//!   into sub-steps so the integrator cannot blow up.
//!
//! Every step is a pure function of `(value, velocity, target, dt, params)`.
//! Angles are in degrees and always take the shortest path across ±180°.

use serde::{Deserialize, Serialize};

/// `(1 + u) e^-u = 0.1` at this `u`: the critically damped response covers 90%
/// of a step change in `smooth_time` when `ω = CRITICAL_SETTLE_FACTOR / smooth_time`.
pub const CRITICAL_SETTLE_FACTOR: f32 = 3.8897;

/// Smallest smooth time accepted (seconds)
pub const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Largest spring integration step (seconds)
pub const MAX_SPRING_STEP: f32 = 1.0 / 240.0;

/// Upper bound on spring sub-steps per call; beyond this the frame is truncated
pub const MAX_SPRING_SUBSTEPS: u32 = 64;

/// Damping algorithm and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DampingMode {
    /// Critically damped approach; `smooth_time` is the 90% settling time in seconds.
    Critical { smooth_time: f32 },
    /// Spring-damper with stiffness `k`, damping `c` and a velocity cap.
    Spring {
        stiffness: f32,
        damping: f32,
        max_rate: f32,
    },
    /// No smoothing: the value jumps straight to the target.
    Instant,
}

impl Default for DampingMode {
    fn default() -> Self {
        Self::Critical { smooth_time: 0.1 }
    }
}

impl DampingMode {
    /// Advance a linear quantity by `dt` seconds.
    pub fn step(&self, value: f32, velocity: f32, target: f32, dt: f32) -> (f32, f32) {
        if !target.is_finite() {
            return (value, velocity);
        }
        if !dt.is_finite() || dt <= 0.0 {
            return (value, velocity);
        }
        match *self {
            DampingMode::Critical { smooth_time } => {
                critical_step(value, velocity, target, dt, smooth_time)
            }
            DampingMode::Spring {
                stiffness,
                damping,
                max_rate,
            } => spring_step(value, velocity, target, dt, stiffness, damping, max_rate),
            DampingMode::Instant => (target, 0.0),
        }
    }

    /// Advance an angle (degrees) by `dt` seconds along the shortest arc.
    ///
    /// The returned angle is normalized to `(-180, 180]`.
    pub fn step_angle(&self, value: f32, velocity: f32, target: f32, dt: f32) -> (f32, f32) {
        let unwrapped_target = value + delta_angle(value, target);
        let (next, velocity) = self.step(value, velocity, unwrapped_target, dt);
        (normalize_angle(next), velocity)
    }

    /// Rough time in seconds this mode needs to settle most of a step change.
    pub fn settle_time(&self) -> f32 {
        match *self {
            DampingMode::Critical { smooth_time } => smooth_time.max(MIN_SMOOTH_TIME),
            DampingMode::Spring { stiffness, .. } => {
                CRITICAL_SETTLE_FACTOR / stiffness.max(1e-3).sqrt()
            }
            DampingMode::Instant => 0.0,
        }
    }

    /// Same algorithm, re-tuned to settle in roughly `seconds`.
    pub fn with_settle_time(self, seconds: f32) -> Self {
        let seconds = seconds.max(MIN_SMOOTH_TIME);
        match self {
            DampingMode::Critical { .. } => DampingMode::Critical { smooth_time: seconds },
            DampingMode::Spring {
                stiffness,
                damping,
                max_rate,
            } => {
                // Keep the damping ratio, move the natural frequency
                let omega = CRITICAL_SETTLE_FACTOR / seconds;
                let ratio = damping / (2.0 * stiffness.max(1e-3).sqrt());
                DampingMode::Spring {
                    stiffness: omega * omega,
                    damping: 2.0 * ratio * omega,
                    max_rate,
                }
            }
            DampingMode::Instant => DampingMode::Instant,
        }
    }

    /// Copy with non-finite or negative parameters replaced by safe values.
    pub fn sanitized(self) -> Self {
        match self {
            DampingMode::Critical { smooth_time } => DampingMode::Critical {
                smooth_time: finite_or(smooth_time, 0.1).max(MIN_SMOOTH_TIME),
            },
            DampingMode::Spring {
                stiffness,
                damping,
                max_rate,
            } => DampingMode::Spring {
                stiffness: finite_or(stiffness, 500.0).max(0.0),
                damping: finite_or(damping, 20.0).max(0.0),
                max_rate: finite_or(max_rate, f32::MAX).abs(),
            },
            DampingMode::Instant => DampingMode::Instant,
        }
    }
}

#[inline]
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Exact critically damped step.
///
/// With error `x = value - target` and `ω = CRITICAL_SETTLE_FACTOR / smooth_time`:
/// `x(t) = (x0 + (v0 + ω x0) t) e^(-ωt)` and
/// `v(t) = (v0 - ω (v0 + ω x0) t) e^(-ωt)`.
/// If the step would carry the value past the target it stops on the target.
pub fn critical_step(value: f32, velocity: f32, target: f32, dt: f32, smooth_time: f32) -> (f32, f32) {
    let omega = CRITICAL_SETTLE_FACTOR / smooth_time.max(MIN_SMOOTH_TIME);
    let error = value - target;
    let temp = velocity + omega * error;
    let decay = (-omega * dt).exp();

    let next_error = (error + temp * dt) * decay;
    let next_velocity = (velocity - omega * temp * dt) * decay;

    if error != 0.0 && next_error.signum() != error.signum() {
        return (target, 0.0);
    }
    (target + next_error, next_velocity)
}

/// Semi-implicit Euler spring-damper step, sub-stepped for large `dt`.
pub fn spring_step(
    value: f32,
    velocity: f32,
    target: f32,
    dt: f32,
    stiffness: f32,
    damping: f32,
    max_rate: f32,
) -> (f32, f32) {
    let steps = ((dt / MAX_SPRING_STEP).ceil() as u32).clamp(1, MAX_SPRING_SUBSTEPS);
    let h = (dt / steps as f32).min(MAX_SPRING_STEP);
    let max_rate = max_rate.abs();

    let mut x = value;
    let mut v = velocity;
    for _ in 0..steps {
        let acceleration = -stiffness * (x - target) - damping * v;
        v = (v + acceleration * h).clamp(-max_rate, max_rate);
        x += v * h;
    }
    (x, v)
}

/// Signed shortest angular difference `to - from` in degrees, in `(-180, 180]`.
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}

/// A damped quantity: current value, its rate of change, and the setpoint it chases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DampedQuantity {
    pub value: f32,
    pub velocity: f32,
    pub setpoint: f32,
}

impl DampedQuantity {
    /// Create a quantity at rest on `value`.
    pub fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            setpoint: value,
        }
    }

    /// Advance toward the setpoint as a linear quantity.
    pub fn advance(&mut self, mode: &DampingMode, dt: f32) -> f32 {
        let (value, velocity) = mode.step(self.value, self.velocity, self.setpoint, dt);
        self.value = value;
        self.velocity = velocity;
        self.value
    }

    /// Advance toward the setpoint as an angle in degrees.
    pub fn advance_angle(&mut self, mode: &DampingMode, dt: f32) -> f32 {
        let (value, velocity) = mode.step_angle(self.value, self.velocity, self.setpoint, dt);
        self.value = value;
        self.velocity = velocity;
        self.value
    }

    /// Advance an angle whose setpoint accumulates input without wrapping.
    ///
    /// The setpoint may lead the value by more than half a turn, so it is
    /// chased linearly and the value always turns the way the input went.
    /// Value and setpoint are then shifted together by whole turns to keep
    /// the value in `(-180, 180]`.
    pub fn advance_winding(&mut self, mode: &DampingMode, dt: f32) -> f32 {
        self.advance(mode, dt);
        let wrapped = normalize_angle(self.value);
        self.setpoint += wrapped - self.value;
        self.value = wrapped;
        self.value
    }

    /// Jump to `value` and stop.
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.setpoint = value;
        self.velocity = 0.0;
    }

    /// Remaining error to the setpoint.
    pub fn error(&self) -> f32 {
        self.setpoint - self.value
    }
}
