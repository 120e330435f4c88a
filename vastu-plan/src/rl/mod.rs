//! Multi-task tabular Q-learning.
//!
//! ## Architecture
//!
//! ```text
//!  MapDefinition ──▶ GridWorld (step: state × action → next, reward, terminal)
//!                        │
//!                        ▼
//!              QLearningTrainer ──writes──▶ QTable (one block per MapId)
//!                                               │
//!                                               ▼ (read-only)
//!                                         QTablePlanner ──▶ PlanOutcome
//! ```
//!
//! ## Key Components
//!
//! - [`Action`]: Up, Down, Left, Right (also the greedy tie-break order)
//! - [`GridWorld`] / [`Episode`]: Deterministic environment and episode bookkeeping
//! - [`QTable`]: Universal table keyed by map id
//! - [`EpsilonSchedule`]: Monotone exploration decay
//! - [`QLearningTrainer`] / [`train`]: Epsilon-greedy training with Bellman backups
//! - [`QTablePlanner`]: Greedy rollout of a trained table

mod action;
mod environment;
mod planner;
mod schedule;
mod table;
mod trainer;

pub use action::Action;
pub use environment::{
    Episode, EpisodeStatus, GOAL_REWARD, GridWorld, INVALID_MOVE_REWARD, STEP_REWARD, Transition,
};
pub use planner::QTablePlanner;
pub use schedule::EpsilonSchedule;
pub use table::{ActionValues, QTable};
pub use trainer::{
    MapSampling, QLearningTrainer, StartMode, TrainingConfig, TrainingDivergence, TrainingMap,
    TrainingReport, train,
};
