//! Exploration schedules.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Epsilon as a function of the global episode index.
///
/// Both variants are non-increasing in the episode index and never drop
/// below their floor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EpsilonSchedule {
    /// `max(floor, start · decay^episode)`
    Exponential {
        /// Epsilon at episode 0
        start: f64,
        /// Per-episode multiplier in (0, 1]
        decay: f64,
        /// Lower bound
        floor: f64,
    },

    /// Straight line from `start` to `floor` over `episodes`, then flat.
    Linear {
        /// Epsilon at episode 0
        start: f64,
        /// Lower bound, reached at `episodes`
        floor: f64,
        /// Length of the ramp
        episodes: usize,
    },
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        EpsilonSchedule::Exponential {
            start: 1.0,
            decay: 0.99992,
            floor: 0.02,
        }
    }
}

impl EpsilonSchedule {
    /// Epsilon for `episode`.
    pub fn epsilon(&self, episode: usize) -> f64 {
        match *self {
            EpsilonSchedule::Exponential {
                start,
                decay,
                floor,
            } => {
                let exponent = episode.min(i32::MAX as usize) as i32;
                (start * decay.powi(exponent)).max(floor)
            }
            EpsilonSchedule::Linear {
                start,
                floor,
                episodes,
            } => {
                if episodes == 0 || episode >= episodes {
                    floor
                } else {
                    let t = episode as f64 / episodes as f64;
                    (start + (floor - start) * t).max(floor)
                }
            }
        }
    }

    /// Values must lie in `[0, 1]` with `floor <= start`.
    pub fn validate(&self) -> Result<()> {
        let (start, floor) = match *self {
            EpsilonSchedule::Exponential {
                start,
                decay,
                floor,
            } => {
                if !(decay > 0.0 && decay <= 1.0) {
                    return Err(PlanError::InvalidConfig(format!(
                        "epsilon decay must be in (0, 1], got {}",
                        decay
                    )));
                }
                (start, floor)
            }
            EpsilonSchedule::Linear { start, floor, .. } => (start, floor),
        };

        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&floor) || floor > start {
            return Err(PlanError::InvalidConfig(format!(
                "epsilon must satisfy 0 <= floor ({}) <= start ({}) <= 1",
                floor, start
            )));
        }
        Ok(())
    }
}
