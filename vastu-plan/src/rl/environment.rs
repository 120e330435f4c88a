//! Grid-world environment shared by training and greedy execution.
//!
//! | Event                          | Reward  | Next state | Terminal |
//! |--------------------------------|---------|------------|----------|
//! | move onto the goal             | +1000   | goal       | yes      |
//! | move into a wall / off the map | -10     | unchanged  | no       |
//! | any other move                 | -1      | target     | no       |

use crate::core::Pose;
use crate::error::Result;
use crate::grid::{ConfigurationSpace, MapDefinition, MapId, RobotGeometry};

use super::action::Action;

/// Reward for reaching the goal
pub const GOAL_REWARD: f64 = 1000.0;
/// Reward for an attempted move into an obstacle or off the grid
pub const INVALID_MOVE_REWARD: f64 = -10.0;
/// Reward for any other valid move
pub const STEP_REWARD: f64 = -1.0;

/// Result of one `step`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// State after the move
    pub next: Pose,
    /// Reward received
    pub reward: f64,
    /// Goal reached
    pub terminal: bool,
}

/// Deterministic grid world for one map.
#[derive(Clone, Debug)]
pub struct GridWorld {
    id: MapId,
    space: ConfigurationSpace,
    goal: Pose,
}

impl GridWorld {
    /// World over an inflated map. The goal must be a free pose.
    pub fn new(id: MapId, space: ConfigurationSpace, goal: Pose) -> Result<Self> {
        space.check_pose(goal, "goal")?;
        Ok(Self { id, space, goal })
    }

    /// World for a loaded map and robot footprint.
    pub fn from_map(map: &MapDefinition, geometry: RobotGeometry) -> Result<Self> {
        let space = ConfigurationSpace::inflate(&map.grid, geometry)?;
        Self::new(map.id.clone(), space, map.goal)
    }

    /// Map identifier
    pub fn id(&self) -> &MapId {
        &self.id
    }

    /// Goal pose
    pub fn goal(&self) -> Pose {
        self.goal
    }

    /// Configuration space the agent moves in
    pub fn space(&self) -> &ConfigurationSpace {
        &self.space
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.space.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.space.cols()
    }

    /// Training episode budget: `max(200, rows·cols / 2)`.
    pub fn episode_step_cap(&self) -> usize {
        200usize.max(self.rows() * self.cols() / 2)
    }

    /// Greedy rollout budget: `max(300, rows·cols)`.
    pub fn rollout_step_cap(&self) -> usize {
        300usize.max(self.rows() * self.cols())
    }

    /// Apply `action` in `state`. Pure: the world is never modified.
    pub fn step(&self, state: Pose, action: Action) -> Transition {
        let target = action.apply(state);
        if !self.space.is_free(target) {
            return Transition {
                next: state,
                reward: INVALID_MOVE_REWARD,
                terminal: false,
            };
        }
        if target == self.goal {
            return Transition {
                next: target,
                reward: GOAL_REWARD,
                terminal: true,
            };
        }
        Transition {
            next: target,
            reward: STEP_REWARD,
            terminal: false,
        }
    }
}

/// Episode status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeStatus {
    /// Still stepping
    Running,
    /// Goal reached
    Succeeded,
    /// Step budget exhausted before the goal
    Truncated,
}

/// Ephemeral bookkeeping for one training episode.
#[derive(Clone, Debug)]
pub struct Episode {
    state: Pose,
    steps: usize,
    total_reward: f64,
    max_steps: usize,
    status: EpisodeStatus,
}

impl Episode {
    /// Episode starting at `start` with a budget of `max_steps` actions.
    pub fn new(start: Pose, max_steps: usize) -> Self {
        Self {
            state: start,
            steps: 0,
            total_reward: 0.0,
            max_steps,
            status: if max_steps == 0 {
                EpisodeStatus::Truncated
            } else {
                EpisodeStatus::Running
            },
        }
    }

    /// Take one action.
    pub fn apply(&mut self, world: &GridWorld, action: Action) -> Transition {
        let transition = world.step(self.state, action);
        self.state = transition.next;
        self.steps += 1;
        self.total_reward += transition.reward;

        if transition.terminal {
            self.status = EpisodeStatus::Succeeded;
        } else if self.steps >= self.max_steps {
            self.status = EpisodeStatus::Truncated;
        }
        transition
    }

    /// Current state
    pub fn state(&self) -> Pose {
        self.state
    }

    /// Actions taken
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Sum of rewards
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Current status
    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    /// Still stepping?
    pub fn is_running(&self) -> bool {
        self.status == EpisodeStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn world() -> GridWorld {
        let grid = Grid::from_ascii("...\n.#.\n...\n").unwrap();
        let space = ConfigurationSpace::inflate(&grid, RobotGeometry::point()).unwrap();
        GridWorld::new(MapId::from("ring"), space, Pose::new(2, 2)).unwrap()
    }

    #[test]
    fn test_caps() {
        let world = world();
        assert_eq!(world.episode_step_cap(), 200);
        assert_eq!(world.rollout_step_cap(), 300);
    }

    #[test]
    fn test_episode_truncates() {
        let world = world();
        let mut episode = Episode::new(Pose::new(0, 0), 2);
        episode.apply(&world, Action::Up);
        assert!(episode.is_running());
        episode.apply(&world, Action::Left);
        assert_eq!(episode.status(), EpisodeStatus::Truncated);
        assert_eq!(episode.total_reward(), 2.0 * INVALID_MOVE_REWARD);
        assert_eq!(episode.state(), Pose::new(0, 0));
    }

    #[test]
    fn test_episode_succeeds() {
        let world = world();
        let mut episode = Episode::new(Pose::new(2, 1), 10);
        let t = episode.apply(&world, Action::Right);
        assert!(t.terminal);
        assert_eq!(episode.status(), EpisodeStatus::Succeeded);
        assert_eq!(episode.steps(), 1);
    }

    #[test]
    fn test_wall_is_invalid() {
        let world = world();
        let t = world.step(Pose::new(0, 1), Action::Down);
        assert_eq!(t.next, Pose::new(0, 1));
        assert_eq!(t.reward, INVALID_MOVE_REWARD);
    }
}
