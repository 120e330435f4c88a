//! Steepest-descent planner with random-walk recovery.
//!
//! The robot repeatedly steps to the free neighbor with the strictly lowest
//! potential. When that is impossible, or the recent window shows it is
//! circling, it switches to a bounded random walk and then resumes descent.
//!
//! ```text
//!             no strict descent / pose repeats
//!   DESCEND ─────────────────────────────────────▶ RECOVERY
//!      ▲                                              │
//!      └──────────── budget exhausted ────────────────┘
//!                  (window cleared)
//! ```
//!
//! Terminal conditions:
//! - goal reached (in either mode): SUCCESS
//! - `max_steps` moves taken: FAILURE / StepLimit
//! - more than `max_recovery_cycles` engagements: FAILURE / Trapped
//! - no free neighbor at all: FAILURE / Isolated

use log::{debug, trace};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::core::{FailureReason, PlanOutcome, Pose};
use crate::error::{PlanError, Result};
use crate::field::{FieldConfig, PotentialField};
use crate::grid::{ConfigurationSpace, Grid, RobotGeometry};

use super::config::DescentConfig;
use super::state::{PlannerMode, PlannerState};

/// Gradient-descent planner.
#[derive(Clone, Debug)]
pub struct GradientDescentPlanner {
    config: DescentConfig,
}

impl GradientDescentPlanner {
    /// Create a planner, rejecting degenerate limits.
    pub fn new(config: DescentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Planner configuration
    pub fn config(&self) -> &DescentConfig {
        &self.config
    }

    /// Run from `start` towards the goal the field was computed for.
    ///
    /// `field` must have been computed over `space`. Randomness is drawn only
    /// during RECOVERY, so two runs with identically seeded generators
    /// produce identical paths.
    pub fn plan<R: Rng>(
        &self,
        space: &ConfigurationSpace,
        field: &PotentialField,
        start: Pose,
        rng: &mut R,
    ) -> Result<PlanOutcome> {
        if field.rows() != space.rows() || field.cols() != space.cols() {
            return Err(PlanError::InvalidGeometry(format!(
                "field is {}x{} but configuration space is {}x{}",
                field.rows(),
                field.cols(),
                space.rows(),
                space.cols()
            )));
        }
        space.check_pose(start, "start")?;

        let goal = field.goal();
        let mut state = PlannerState::new(start, self.config.history_len);

        loop {
            if state.current == goal {
                debug!(
                    "[Descent] SUCCESS: reached {} in {} steps ({} recoveries)",
                    goal, state.steps, state.recovery_engagements
                );
                return Ok(PlanOutcome::success(
                    state.path,
                    state.steps,
                    state.recovery_engagements,
                ));
            }

            if state.steps >= self.config.max_steps {
                return Ok(self.fail(FailureReason::StepLimit, state));
            }

            let neighbors = space.free_neighbors(state.current, self.config.allow_diagonal);
            if neighbors.is_empty() {
                return Ok(self.fail(FailureReason::Isolated, state));
            }

            match state.mode {
                PlannerMode::Descend => {
                    let current_value = field.value(state.current);
                    let (best, best_value) = steepest(field, &neighbors);

                    if best_value >= current_value {
                        trace!(
                            "[Descent] Local minimum at {} (U={:.3})",
                            state.current, current_value
                        );
                        if !self.engage_recovery(&mut state) {
                            return Ok(self.fail(FailureReason::Trapped, state));
                        }
                        continue;
                    }

                    state.advance(best);
                    trace!("[Descent] Step {} -> {} (U={:.3})", state.steps, best, best_value);

                    if best != goal
                        && self.is_stalled(space, field, &state)
                        && !self.engage_recovery(&mut state)
                    {
                        return Ok(self.fail(FailureReason::Trapped, state));
                    }
                }
                PlannerMode::Recovery { remaining } => {
                    // `neighbors` is non-empty, so choose always yields a pose
                    if let Some(&next) = neighbors.choose(rng) {
                        state.advance(next);
                        trace!("[Descent] Random step {} -> {}", state.steps, next);
                    }

                    if remaining <= 1 {
                        state.mode = PlannerMode::Descend;
                        state.history.clear();
                        state.history.push(state.current);
                        trace!("[Descent] Recovery budget spent at {}, resuming descent", state.current);
                    } else {
                        state.mode = PlannerMode::Recovery {
                            remaining: remaining - 1,
                        };
                    }
                }
            }
        }
    }

    /// Oscillation (pose repeated in the window) or no strictly lower
    /// neighbor outside the window.
    fn is_stalled(
        &self,
        space: &ConfigurationSpace,
        field: &PotentialField,
        state: &PlannerState,
    ) -> bool {
        if state.history.newest_repeats() {
            return true;
        }

        let current_value = field.value(state.current);
        let best_unvisited = space
            .free_neighbors(state.current, self.config.allow_diagonal)
            .into_iter()
            .filter(|&n| !state.history.contains(n))
            .map(|n| field.value(n))
            .fold(f64::INFINITY, f64::min);

        best_unvisited >= current_value
    }

    /// Switch to RECOVERY. Returns false once the engagement limit is exceeded.
    fn engage_recovery(&self, state: &mut PlannerState) -> bool {
        state.recovery_engagements += 1;
        if state.recovery_engagements > self.config.max_recovery_cycles {
            return false;
        }
        debug!(
            "[Descent] Entering recovery #{} at {} after {} steps",
            state.recovery_engagements, state.current, state.steps
        );
        state.mode = PlannerMode::Recovery {
            remaining: self.config.recovery_steps,
        };
        true
    }

    fn fail(&self, reason: FailureReason, state: PlannerState) -> PlanOutcome {
        debug!(
            "[Descent] FAILED ({:?}) in {} mode at {} after {} steps, {} recoveries",
            reason,
            state.mode.name(),
            state.current,
            state.steps,
            state.recovery_engagements
        );
        PlanOutcome::failed(
            reason,
            state.path,
            state.steps,
            state.recovery_engagements,
        )
    }
}

/// Lowest-potential neighbor; the first in priority order wins ties.
fn steepest(field: &PotentialField, neighbors: &[Pose]) -> (Pose, f64) {
    let mut best = neighbors[0];
    let mut best_value = field.value(best);
    for &n in &neighbors[1..] {
        let value = field.value(n);
        if value < best_value {
            best = n;
            best_value = value;
        }
    }
    (best, best_value)
}

/// Inflate, build the field, and run the descent planner in one call.
///
/// Geometry, configuration and start/goal placement are validated before any
/// stepping begins.
pub fn plan<R: Rng>(
    grid: &Grid,
    start: Pose,
    goal: Pose,
    geometry: RobotGeometry,
    field_config: &FieldConfig,
    descent_config: &DescentConfig,
    rng: &mut R,
) -> Result<PlanOutcome> {
    let planner = GradientDescentPlanner::new(descent_config.clone())?;
    let space = ConfigurationSpace::inflate(grid, geometry)?;
    space.check_pose(start, "start")?;
    let field = PotentialField::compute(&space, goal, field_config)?;
    planner.plan(&space, &field, start, rng)
}
