//! # VastuPlan
//!
//! Grid path planning for a rectangular robot with two strategies:
//! potential-field gradient descent with random-walk recovery, and
//! multi-task tabular Q-learning.
//!
//! ## Overview
//!
//! ```text
//!   map text ──► Grid ──► ConfigurationSpace (inflated by robot footprint)
//!                               │
//!              ┌────────────────┴─────────────────┐
//!              ▼                                  ▼
//!       PotentialField                      GridWorld (env)
//!              │                                  │
//!   GradientDescentPlanner              QLearningTrainer ──► QTable
//!     DESCEND ◄──► RECOVERY                       │
//!              │                            QTablePlanner
//!              └──────────────┬───────────────────┘
//!                             ▼
//!                        PlanOutcome
//! ```
//!
//! - **Configuration space**: a pose is free when the whole footprint
//!   anchored there lies on free cells inside the grid
//! - **Potential field**: conic attraction to the goal plus exponential
//!   repulsion near obstacles; occupied cells are `+∞`
//! - **Descent planner**: steepest descent, stall detection over a bounded
//!   history, random-walk recovery, step and recovery caps
//! - **Q-learning**: one shared table over many maps, epsilon-greedy
//!   training, greedy rollout at run time
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_plan::{FieldConfig, DescentConfig, RobotGeometry, PlanningSession};
//! use vastu_plan::io::load_map;
//! use rand::SeedableRng;
//!
//! let map = load_map(Path::new("maps/scenario1.txt"))?;
//! let mut session = PlanningSession::new(map);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let outcome = session.plan_descent(
//!     RobotGeometry::new(2, 2),
//!     &FieldConfig::default(),
//!     &DescentConfig::default(),
//!     &mut rng,
//! )?;
//! println!("{} after {} steps", outcome.status.as_str(), outcome.step_count);
//! ```
//!
//! ## Coordinate System
//!
//! Poses are `(row, col)` cell indices: row 0 is the first line of the map
//! file, column 0 its first token. North is decreasing row.

#![warn(missing_docs)]

// Core types
pub mod core;

// Error taxonomy
pub mod error;

// Occupancy grid, robot footprint, configuration space
pub mod grid;

// Unified configuration
pub mod config;

// Potential field generation
pub mod field;

// Gradient-descent planner with recovery
pub mod planner;

// Grid-world environment and Q-learning
pub mod rl;

// Cached per-map planning
pub mod session;

// Map files, model persistence, SVG export
pub mod io;

// Benchmark harness
pub mod evaluation;

// Re-export commonly used types
pub use crate::core::{CellState, FailureReason, PlanOutcome, PlanStatus, Pose};

pub use error::{PlanError, Result};

pub use grid::{ConfigurationSpace, Grid, MapDefinition, MapId, RobotGeometry};

pub use config::{ConfigLoadError, PersistenceSection, PlannerConfig};

pub use field::{FieldConfig, PotentialField};

pub use planner::{DescentConfig, GradientDescentPlanner};

pub use rl::{
    Action, EpsilonSchedule, GridWorld, QLearningTrainer, QTable, QTablePlanner, TrainingConfig,
    TrainingMap, TrainingReport,
};

pub use session::PlanningSession;

pub use evaluation::{BenchmarkReport, ScenarioResult};
