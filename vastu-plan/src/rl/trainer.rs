//! Multi-task tabular Q-learning.
//!
//! Every episode picks one map, runs epsilon-greedy from a start pose and
//! applies the Bellman backup after each transition:
//!
//! ```text
//! target  = r                          (goal reached)
//!         = r + γ · max_a' Q(s', a')   (otherwise)
//! Q(s,a) += lr · (target − Q(s,a))
//! ```
//!
//! All maps update one shared [`QTable`], each in its own block.

use log::{debug, info, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::Pose;
use crate::error::{PlanError, Result};
use crate::grid::{MapDefinition, RobotGeometry};

use super::action::Action;
use super::environment::{Episode, EpisodeStatus, GridWorld};
use super::schedule::EpsilonSchedule;
use super::table::QTable;

/// How each episode picks its map
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapSampling {
    /// Cycle through the maps in order
    #[default]
    RoundRobin,
    /// Pick uniformly at random
    Uniform,
}

/// Where each episode starts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartMode {
    /// The map's start marker
    #[default]
    Fixed,
    /// A uniformly random free pose other than the goal
    Random,
}

/// Q-learning hyperparameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Episodes per map (total = this × number of maps).
    /// Default: 15000
    #[serde(default = "defaults::episodes_per_map")]
    pub episodes_per_map: usize,

    /// Step size of the Bellman update.
    /// Default: 0.1
    #[serde(default = "defaults::learning_rate")]
    pub learning_rate: f64,

    /// Discount factor γ.
    /// Default: 0.99
    #[serde(default = "defaults::discount")]
    pub discount: f64,

    /// Exploration schedule over the global episode index.
    #[serde(default)]
    pub epsilon: EpsilonSchedule,

    /// Map selection per episode.
    #[serde(default)]
    pub sampling: MapSampling,

    /// Start pose selection per episode.
    #[serde(default)]
    pub start_mode: StartMode,

    /// Episodes per reward-statistics window.
    /// Default: 500
    #[serde(default = "defaults::report_window")]
    pub report_window: usize,

    /// Relative drop of the last window's mean reward below the best window
    /// that is reported as divergence.
    /// Default: 0.25
    #[serde(default = "defaults::divergence_tolerance")]
    pub divergence_tolerance: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes_per_map: defaults::episodes_per_map(),
            learning_rate: defaults::learning_rate(),
            discount: defaults::discount(),
            epsilon: EpsilonSchedule::default(),
            sampling: MapSampling::default(),
            start_mode: StartMode::default(),
            report_window: defaults::report_window(),
            divergence_tolerance: defaults::divergence_tolerance(),
        }
    }
}

impl TrainingConfig {
    /// Check ranges of every parameter.
    pub fn validate(&self) -> Result<()> {
        if self.episodes_per_map == 0 {
            return Err(PlanError::InvalidConfig(
                "episodes_per_map must be at least 1".to_string(),
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(PlanError::InvalidConfig(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(PlanError::InvalidConfig(format!(
                "discount must be in [0, 1], got {}",
                self.discount
            )));
        }
        if self.report_window == 0 {
            return Err(PlanError::InvalidConfig(
                "report_window must be at least 1".to_string(),
            ));
        }
        self.epsilon.validate()
    }
}

/// One map prepared for training.
#[derive(Clone, Debug)]
pub struct TrainingMap {
    world: GridWorld,
    start: Pose,
    free_starts: Vec<Pose>,
}

impl TrainingMap {
    /// Prepare a world with a fixed start. The start must be free.
    pub fn new(world: GridWorld, start: Pose) -> Result<Self> {
        world.space().check_pose(start, "start")?;
        let goal = world.goal();
        let free_starts = world
            .space()
            .grid()
            .free_poses()
            .filter(|&p| p != goal)
            .collect();
        Ok(Self {
            world,
            start,
            free_starts,
        })
    }

    /// Prepare a loaded map for a robot footprint.
    pub fn from_map(map: &MapDefinition, geometry: RobotGeometry) -> Result<Self> {
        Self::new(GridWorld::from_map(map, geometry)?, map.start)
    }

    /// The environment
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// Fixed start pose
    pub fn start(&self) -> Pose {
        self.start
    }

    fn pick_start<R: Rng>(&self, mode: StartMode, rng: &mut R) -> Pose {
        match mode {
            StartMode::Fixed => self.start,
            StartMode::Random => self.free_starts.choose(rng).copied().unwrap_or(self.start),
        }
    }
}

/// Mean reward fell well below an earlier window.
///
/// Advisory only: training still completes and the table is returned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainingDivergence {
    /// Index of the best window
    pub best_window: usize,
    /// Mean reward of the best window
    pub best_mean_reward: f64,
    /// Mean reward of the last complete window
    pub last_mean_reward: f64,
}

/// Summary of a training run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainingReport {
    /// Episodes run
    pub episodes: usize,
    /// Episodes that reached the goal
    pub successes: usize,
    /// Episodes cut off by the step budget
    pub truncations: usize,
    /// Epsilon used for the last episode
    pub final_epsilon: f64,
    /// Mean episode reward per complete window
    pub window_rewards: Vec<f64>,
    /// Set when the last window regressed past the tolerance
    pub divergence: Option<TrainingDivergence>,
}

impl TrainingReport {
    /// Fraction of episodes that reached the goal.
    pub fn success_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.successes as f64 / self.episodes as f64
        }
    }
}

/// Epsilon-greedy tabular Q-learning over many maps.
#[derive(Clone, Debug)]
pub struct QLearningTrainer {
    config: TrainingConfig,
}

impl QLearningTrainer {
    /// Create a trainer, rejecting out-of-range hyperparameters.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Trainer configuration
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train a fresh table on `maps`.
    pub fn train<R: Rng>(&self, maps: &[TrainingMap], rng: &mut R) -> Result<(QTable, TrainingReport)> {
        let mut table = QTable::new();
        let report = self.train_into(&mut table, maps, rng)?;
        Ok((table, report))
    }

    /// Continue training `table` on `maps`. Blocks for maps not yet in the
    /// table are created zero-initialised.
    pub fn train_into<R: Rng>(
        &self,
        table: &mut QTable,
        maps: &[TrainingMap],
        rng: &mut R,
    ) -> Result<TrainingReport> {
        if maps.is_empty() {
            return Err(PlanError::InvalidConfig(
                "training needs at least one map".to_string(),
            ));
        }
        for map in maps {
            let world = map.world();
            table.ensure_map(world.id(), world.rows(), world.cols());
        }

        let total = self.config.episodes_per_map * maps.len();
        let progress_every = (total / 10).max(1);
        info!(
            "[QTrain] Training on {} maps ({} episodes, lr={}, gamma={})",
            maps.len(),
            total,
            self.config.learning_rate,
            self.config.discount
        );

        let mut report = TrainingReport::default();
        let mut window_sum = 0.0;

        for episode in 0..total {
            let map = match self.config.sampling {
                MapSampling::RoundRobin => &maps[episode % maps.len()],
                MapSampling::Uniform => &maps[rng.random_range(0..maps.len())],
            };
            let epsilon = self.config.epsilon.epsilon(episode);
            let start = map.pick_start(self.config.start_mode, rng);

            let outcome = self.run_episode(table, map, start, epsilon, rng)?;
            match outcome.status() {
                EpisodeStatus::Succeeded => report.successes += 1,
                _ => report.truncations += 1,
            }
            report.episodes += 1;
            report.final_epsilon = epsilon;
            window_sum += outcome.total_reward();

            if report.episodes % self.config.report_window == 0 {
                let mean = window_sum / self.config.report_window as f64;
                debug!(
                    "[QTrain] Window {}: mean reward {:.1}, epsilon {:.3}",
                    report.window_rewards.len(),
                    mean,
                    epsilon
                );
                report.window_rewards.push(mean);
                window_sum = 0.0;
            }
            if (episode + 1) % progress_every == 0 {
                info!(
                    "[QTrain] Progress: {:.1}% (epsilon {:.3}, {} successes)",
                    100.0 * (episode + 1) as f64 / total as f64,
                    epsilon,
                    report.successes
                );
            }
        }

        report.divergence = detect_divergence(&report.window_rewards, self.config.divergence_tolerance);
        if let Some(d) = report.divergence {
            warn!(
                "[QTrain] Mean reward regressed: last window {:.1} vs best {:.1} (window {})",
                d.last_mean_reward, d.best_mean_reward, d.best_window
            );
        }
        info!(
            "[QTrain] Training complete: {}/{} episodes reached the goal",
            report.successes, report.episodes
        );
        Ok(report)
    }

    fn run_episode<R: Rng>(
        &self,
        table: &mut QTable,
        map: &TrainingMap,
        start: Pose,
        epsilon: f64,
        rng: &mut R,
    ) -> Result<Episode> {
        let world = map.world();
        let values = table.map_mut(world.id())?;
        let mut episode = Episode::new(start, world.episode_step_cap());
        if start == world.goal() {
            return Ok(episode);
        }

        while episode.is_running() {
            let state = episode.state();
            let action = if rng.random::<f64>() < epsilon {
                Action::ALL[rng.random_range(0..Action::COUNT)]
            } else {
                values.best_action(state)
            };

            let transition = episode.apply(world, action);
            let target = if transition.terminal {
                transition.reward
            } else {
                transition.reward + self.config.discount * values.max_value(transition.next)
            };
            values.update(state, action, target, self.config.learning_rate);
        }

        Ok(episode)
    }
}

/// Train a fresh universal table with `config`.
pub fn train<R: Rng>(
    maps: &[TrainingMap],
    config: &TrainingConfig,
    rng: &mut R,
) -> Result<(QTable, TrainingReport)> {
    QLearningTrainer::new(config.clone())?.train(maps, rng)
}

/// Compare the last complete window against the best earlier one.
fn detect_divergence(windows: &[f64], tolerance: f64) -> Option<TrainingDivergence> {
    let (last, earlier) = windows.split_last()?;
    let (best_window, best) = earlier
        .iter()
        .copied()
        .enumerate()
        .fold(None, |acc: Option<(usize, f64)>, (i, v)| match acc {
            Some((_, b)) if b >= v => acc,
            _ => Some((i, v)),
        })?;

    let margin = tolerance * best.abs().max(1.0);
    (best - *last > margin).then_some(TrainingDivergence {
        best_window,
        best_mean_reward: best,
        last_mean_reward: *last,
    })
}
