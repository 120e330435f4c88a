//! Core types for the VastuPlan library.
//!
//! All planning happens on integer cell indices. A [`Pose`] is `(row, col)`
//! with row 0 at the top of the map file, matching the order in which map
//! rows are read.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`Pose`]: Robot position reduced to a single configuration-space cell
//! - [`NEIGHBORS_8`] / [`NEIGHBORS_4`]: Neighborhood offsets in tie-break order
//!
//! ### Grid Cells
//! - [`CellState`]: Binary occupancy (Free, Occupied)
//!
//! ### Results
//! - [`PlanOutcome`]: Path, status and counters returned by every planner
//! - [`PlanStatus`] / [`FailureReason`]: Terminal status of a run

mod cell;
mod outcome;
mod pose;

pub use cell::CellState;
pub use outcome::{FailureReason, PlanOutcome, PlanStatus};
pub use pose::{NEIGHBORS_4, NEIGHBORS_8, Pose, path_length};
