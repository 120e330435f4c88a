//! Unified configuration loading for the planners.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_plan::config::PlannerConfig;
//!
//! // Load from default path (configs/planner.yaml)
//! let config = PlannerConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = PlannerConfig::default();
//!
//! // Convert to runtime configs
//! let field = config.to_field_config();
//! let descent = config.to_descent_config();
//! let training = config.to_training_config();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | `robot` | Footprint width/height in cells |
//! | `field` | Attractive/repulsive gains, influence radius |
//! | `descent` | Connectivity, stall window, recovery budget, step cap |
//! | `training` | Episodes, learning rate, discount, epsilon schedule, sampling |
//! | [`PersistenceSection`] | Map directory, model artifact, output directory |
//!
//! ## Example YAML
//!
//! ```yaml
//! robot:
//!   width: 2
//!   height: 2
//!
//! field:
//!   attract_gain: 3.0
//!   repulse_gain: 20.0
//!   influence_radius: 1.5
//!
//! descent:
//!   allow_diagonal: true
//!   recovery_steps: 100
//!
//! training:
//!   episodes_per_map: 15000
//!   epsilon:
//!     kind: exponential
//!     start: 1.0
//!     decay: 0.99992
//!     floor: 0.02
//!
//! persistence:
//!   map_dir: maps
//!   model_path: models/universal.vqtab
//!
//! seed: 42
//! ```

pub(crate) mod defaults;
mod error;
mod persistence;
mod planner;

pub use error::ConfigLoadError;
pub use persistence::PersistenceSection;
pub use planner::PlannerConfig;
