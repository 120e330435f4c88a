//! Potential field parameters.

use crate::config::defaults;
use crate::error::{PlanError, Result};
use serde::{Deserialize, Serialize};

/// Gains and influence radius of the potential field.
///
/// ```text
/// U(c) = attract_gain * |c - goal|
///      + Σ repulse_gain * exp(-|c - o|)   for occupied o with |c - o| <= influence_radius
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Slope of the conic attractive well (per cell of distance)
    #[serde(default = "defaults::attract_gain")]
    pub attract_gain: f64,

    /// Scale of the exponential obstacle barrier
    #[serde(default = "defaults::repulse_gain")]
    pub repulse_gain: f64,

    /// Obstacles farther than this (cells, Euclidean) exert no repulsion
    #[serde(default = "defaults::influence_radius")]
    pub influence_radius: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            attract_gain: defaults::attract_gain(),
            repulse_gain: defaults::repulse_gain(),
            influence_radius: defaults::influence_radius(),
        }
    }
}

impl FieldConfig {
    /// All three parameters must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("attract_gain", self.attract_gain),
            ("repulse_gain", self.repulse_gain),
            ("influence_radius", self.influence_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Hashable key for caching fields computed with this configuration.
    pub(crate) fn cache_key(&self) -> [u64; 3] {
        [
            self.attract_gain.to_bits(),
            self.repulse_gain.to_bits(),
            self.influence_radius.to_bits(),
        ]
    }
}
