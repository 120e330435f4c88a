//! Potential-field path planning.
//!
//! - [`GradientDescentPlanner`]: steepest descent with stall detection and
//!   random-walk recovery
//! - [`plan`]: one-shot helper that inflates, builds the field and plans
//! - [`DescentConfig`]: connectivity, window, recovery and step limits
//!
//! Neighbor priority for ties is clockwise from north
//! (N, NE, E, SE, S, SW, W, NW; 4-connected: N, E, S, W).
//!
//! ## Example
//!
//! ```rust,ignore
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use vastu_plan::planner::{DescentConfig, plan};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let outcome = plan(&grid, start, goal, geometry, &FieldConfig::default(),
//!                    &DescentConfig::default(), &mut rng)?;
//! println!("{} in {} steps", outcome.status.as_str(), outcome.step_count);
//! ```

mod config;
mod descent;
mod state;

pub use config::DescentConfig;
pub use descent::{GradientDescentPlanner, plan};
pub use state::{PlannerMode, PlannerState, StallHistory};
