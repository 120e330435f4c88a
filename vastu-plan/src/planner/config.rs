//! Configuration for the gradient-descent planner.

use crate::config::defaults;
use crate::error::{PlanError, Result};
use serde::{Deserialize, Serialize};

/// Stepping, stall detection and recovery limits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescentConfig {
    /// Step to diagonal neighbors (8-connected) instead of 4-connected.
    /// Default: true
    #[serde(default = "defaults::allow_diagonal")]
    pub allow_diagonal: bool,

    /// Poses kept in the stall/oscillation window.
    /// Default: 16
    #[serde(default = "defaults::history_len")]
    pub history_len: usize,

    /// Random moves per recovery engagement.
    /// Default: 100
    #[serde(default = "defaults::recovery_steps")]
    pub recovery_steps: usize,

    /// Recovery engagements allowed before the run is declared trapped.
    /// Default: 50
    #[serde(default = "defaults::max_recovery_cycles")]
    pub max_recovery_cycles: usize,

    /// Global cap on moves (descent and recovery combined).
    /// Default: 5000
    #[serde(default = "defaults::max_steps")]
    pub max_steps: usize,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            allow_diagonal: defaults::allow_diagonal(),
            history_len: defaults::history_len(),
            recovery_steps: defaults::recovery_steps(),
            max_recovery_cycles: defaults::max_recovery_cycles(),
            max_steps: defaults::max_steps(),
        }
    }
}

impl DescentConfig {
    /// 4-connected variant of the defaults.
    pub fn four_connected() -> Self {
        Self {
            allow_diagonal: false,
            ..Default::default()
        }
    }

    /// Reject limits that would make the state machine degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.history_len == 0 {
            return Err(PlanError::InvalidConfig(
                "history_len must be at least 1".to_string(),
            ));
        }
        if self.recovery_steps == 0 {
            return Err(PlanError::InvalidConfig(
                "recovery_steps must be at least 1".to_string(),
            ));
        }
        if self.max_steps == 0 {
            return Err(PlanError::InvalidConfig(
                "max_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
