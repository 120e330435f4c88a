//! Greedy execution of a trained Q-table.

use log::{debug, trace};

use crate::core::{FailureReason, PlanOutcome, Pose};
use crate::error::{PlanError, Result};
use crate::grid::{MapDefinition, RobotGeometry};

use super::environment::GridWorld;
use super::table::QTable;

/// Follows `argmax_a Q(s, a)` until the goal or the rollout cap.
///
/// Borrows the table read-only; many planners can share one table.
#[derive(Clone, Copy, Debug)]
pub struct QTablePlanner<'a> {
    table: &'a QTable,
}

impl<'a> QTablePlanner<'a> {
    /// Planner over a trained table.
    pub fn new(table: &'a QTable) -> Self {
        Self { table }
    }

    /// Roll out the greedy policy in `world` from `start`.
    ///
    /// The path only grows on actual moves; a greedy action into a wall
    /// still counts as a step. Hitting the rollout cap is reported as
    /// FAILURE / StepLimit, which means the map was under-trained.
    pub fn plan(&self, world: &GridWorld, start: Pose) -> Result<PlanOutcome> {
        let values = self.table.map(world.id())?;
        if values.rows() != world.rows() || values.cols() != world.cols() {
            return Err(PlanError::ModelNotTrained(format!(
                "table for '{}' is {}x{} but the map is {}x{}",
                world.id(),
                values.rows(),
                values.cols(),
                world.rows(),
                world.cols()
            )));
        }
        world.space().check_pose(start, "start")?;

        let cap = world.rollout_step_cap();
        let mut state = start;
        let mut path = vec![start];
        let mut steps = 0;

        while state != world.goal() {
            if steps >= cap {
                debug!(
                    "[QPlan] '{}' FAILED: step cap {} hit at {}",
                    world.id(),
                    cap,
                    state
                );
                return Ok(PlanOutcome::failed(FailureReason::StepLimit, path, steps, 0));
            }

            let action = values.best_action(state);
            let transition = world.step(state, action);
            steps += 1;
            trace!("[QPlan] {} {} -> {}", state, action.name(), transition.next);
            if transition.next != state {
                state = transition.next;
                path.push(state);
            }
        }

        debug!("[QPlan] '{}' reached goal in {} steps", world.id(), steps);
        Ok(PlanOutcome::success(path, steps, 0))
    }

    /// Roll out on a loaded map from its start marker.
    pub fn plan_map(&self, map: &MapDefinition, geometry: RobotGeometry) -> Result<PlanOutcome> {
        let world = GridWorld::from_map(map, geometry)?;
        self.plan(&world, map.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlanStatus;
    use crate::grid::{ConfigurationSpace, Grid, MapId};
    use crate::rl::Action;

    fn world() -> GridWorld {
        let grid = Grid::from_ascii("...\n").unwrap();
        let space = ConfigurationSpace::inflate(&grid, RobotGeometry::point()).unwrap();
        GridWorld::new(MapId::from("line"), space, Pose::new(0, 2)).unwrap()
    }

    #[test]
    fn test_follows_greedy_actions() {
        let mut table = QTable::new();
        let values = table.ensure_map(&MapId::from("line"), 1, 3);
        values.set(Pose::new(0, 0), Action::Right, 1.0);
        values.set(Pose::new(0, 1), Action::Right, 1.0);

        let outcome = QTablePlanner::new(&table).plan(&world(), Pose::new(0, 0)).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.step_count, 2);
        assert_eq!(outcome.path, vec![Pose::new(0, 0), Pose::new(0, 1), Pose::new(0, 2)]);
    }

    #[test]
    fn test_untrained_table_hits_cap() {
        let mut table = QTable::new();
        table.ensure_map(&MapId::from("line"), 1, 3);

        // Zero table: Up forever
        let outcome = QTablePlanner::new(&table).plan(&world(), Pose::new(0, 0)).unwrap();
        assert_eq!(outcome.status, PlanStatus::Failure);
        assert_eq!(outcome.failure_reason, Some(FailureReason::StepLimit));
        assert_eq!(outcome.step_count, 300);
        assert_eq!(outcome.path, vec![Pose::new(0, 0)]);
    }

    #[test]
    fn test_unknown_map() {
        let table = QTable::new();
        let err = QTablePlanner::new(&table).plan(&world(), Pose::new(0, 0)).unwrap_err();
        assert!(matches!(err, PlanError::UnknownMap(_)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut table = QTable::new();
        table.ensure_map(&MapId::from("line"), 2, 3);
        let err = QTablePlanner::new(&table).plan(&world(), Pose::new(0, 0)).unwrap_err();
        assert!(matches!(err, PlanError::ModelNotTrained(_)));
    }
}
