//! Planner results shared by both planning strategies.

use serde::{Deserialize, Serialize};

use super::pose::{Pose, path_length};

/// Terminal status of a planning run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanStatus {
    /// The goal was reached
    Success,
    /// The planner gave up (see [`FailureReason`])
    Failure,
}

impl PlanStatus {
    /// Label used in reports
    pub fn as_str(self) -> &'static str {
        match self {
            PlanStatus::Success => "SUCCESS",
            PlanStatus::Failure => "FAILURE",
        }
    }
}

/// Why a planning run ended in [`PlanStatus::Failure`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// The global step cap was hit
    StepLimit,
    /// Recovery was engaged more often than allowed
    Trapped,
    /// The robot has no free neighbor to move to
    Isolated,
}

/// Outcome of a `plan` call.
///
/// `path` always starts at the start pose and contains every pose the robot
/// occupied, including random-walk steps taken during recovery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// Terminal status
    pub status: PlanStatus,
    /// Visited poses in order
    pub path: Vec<Pose>,
    /// Number of moves executed
    pub step_count: usize,
    /// Number of times recovery mode was entered (always 0 for Q-table runs)
    pub recovery_engagements: usize,
    /// Reason for failure (if any)
    pub failure_reason: Option<FailureReason>,
}

impl PlanOutcome {
    /// Successful run
    pub fn success(path: Vec<Pose>, step_count: usize, recovery_engagements: usize) -> Self {
        Self {
            status: PlanStatus::Success,
            path,
            step_count,
            recovery_engagements,
            failure_reason: None,
        }
    }

    /// Failed run
    pub fn failed(
        reason: FailureReason,
        path: Vec<Pose>,
        step_count: usize,
        recovery_engagements: usize,
    ) -> Self {
        Self {
            status: PlanStatus::Failure,
            path,
            step_count,
            recovery_engagements,
            failure_reason: Some(reason),
        }
    }

    /// Did the run reach the goal?
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == PlanStatus::Success
    }

    /// Path length in cells (diagonal moves count √2)
    pub fn path_length(&self) -> f64 {
        path_length(&self.path)
    }

    /// Final pose of the path
    pub fn end(&self) -> Option<Pose> {
        self.path.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_constructors() {
        let ok = PlanOutcome::success(vec![Pose::new(0, 0), Pose::new(0, 1)], 1, 0);
        assert!(ok.is_success());
        assert_eq!(ok.failure_reason, None);
        assert_eq!(ok.end(), Some(Pose::new(0, 1)));
        assert_eq!(ok.path_length(), 1.0);

        let failed = PlanOutcome::failed(FailureReason::StepLimit, vec![Pose::new(0, 0)], 0, 2);
        assert!(!failed.is_success());
        assert_eq!(failed.status.as_str(), "FAILURE");
        assert_eq!(failed.failure_reason, Some(FailureReason::StepLimit));
    }
}
