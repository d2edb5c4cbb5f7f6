//! Pointer input deadzone filtering.
//!
//! Tiny pointer deltas from sensor noise make a resting camera creep. A
//! deadzone suppresses input whose magnitude is below a threshold; the soft
//! variant additionally eases the response in just above the threshold.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Deadzone policy applied to the raw pointer delta before sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeadzonePolicy {
    /// Pass input through untouched.
    #[default]
    Off,
    /// Zero below the threshold, unchanged above it.
    Hard { threshold: f32 },
    /// Zero below the threshold; above it the input is scaled by an
    /// ease-in-out curve over `[threshold, 1]`.
    Soft { threshold: f32 },
}

impl DeadzonePolicy {
    /// Filter a two-axis input.
    pub fn apply(&self, input: Vec2) -> Vec2 {
        if !input.is_finite() {
            return Vec2::ZERO;
        }
        match *self {
            DeadzonePolicy::Off => input,
            DeadzonePolicy::Hard { threshold } => {
                if input.length() < threshold {
                    Vec2::ZERO
                } else {
                    input
                }
            }
            DeadzonePolicy::Soft { threshold } => {
                let magnitude = input.length();
                if magnitude < threshold || magnitude <= 0.0 {
                    return Vec2::ZERO;
                }
                let span = (1.0 - threshold).max(1e-6);
                let normalized = ((magnitude - threshold) / span).clamp(0.0, 1.0);
                input * ease_in_out(normalized)
            }
        }
    }

    /// Threshold of the policy, 0 when off.
    pub fn threshold(&self) -> f32 {
        match *self {
            DeadzonePolicy::Off => 0.0,
            DeadzonePolicy::Hard { threshold } | DeadzonePolicy::Soft { threshold } => threshold,
        }
    }

    /// Copy with the threshold clamped into `[0, 1)`.
    pub fn sanitized(self) -> Self {
        let clamp = |t: f32| if t.is_finite() { t.clamp(0.0, 0.99) } else { 0.0 };
        match self {
            DeadzonePolicy::Off => DeadzonePolicy::Off,
            DeadzonePolicy::Hard { threshold } => DeadzonePolicy::Hard {
                threshold: clamp(threshold),
            },
            DeadzonePolicy::Soft { threshold } => DeadzonePolicy::Soft {
                threshold: clamp(threshold),
            },
        }
    }
}

/// Cubic ease-in-out with flat ends: `3t² - 2t³`.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_passes_through() {
        let input = Vec2::new(0.0001, -0.0002);
        assert_eq!(DeadzonePolicy::Off.apply(input), input);
    }

    #[test]
    fn test_hard_suppresses_noise_only() {
        let policy = DeadzonePolicy::Hard { threshold: 0.05 };
        assert_eq!(policy.apply(Vec2::new(0.01, 0.02)), Vec2::ZERO);
        assert_eq!(policy.apply(Vec2::new(0.5, 0.0)), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_soft_eases_in_and_saturates() {
        let policy = DeadzonePolicy::Soft { threshold: 0.1 };
        assert_eq!(policy.apply(Vec2::new(0.05, 0.0)), Vec2::ZERO);

        let eased = policy.apply(Vec2::new(0.2, 0.0));
        assert!(eased.x > 0.0 && eased.x < 0.2);

        // Large deltas are unaffected
        let big = Vec2::new(3.0, -4.0);
        assert_eq!(policy.apply(big), big);
    }

    #[test]
    fn test_soft_keeps_direction() {
        let policy = DeadzonePolicy::Soft { threshold: 0.001 };
        let out = policy.apply(Vec2::new(0.3, 0.4));
        assert!((out.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_non_finite_input_is_dropped() {
        let policy = DeadzonePolicy::Off;
        assert_eq!(policy.apply(Vec2::new(f32::NAN, 1.0)), Vec2::ZERO);
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }
}
