//! Occupancy grid and configuration space.
//!
//! The source map is a binary occupancy [`Grid`]. Before planning, obstacles
//! are inflated by the robot footprint so the robot can be treated as a single
//! cell:
//!
//! ```text
//! ┌─────────────────┐   RobotGeometry   ┌──────────────────────┐
//! │      Grid       │ ────────────────▶ │  ConfigurationSpace  │
//! │ (Free/Occupied) │  summed-area test │ (point-robot grid)   │
//! └─────────────────┘                   └──────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`Grid`]: Row-major binary occupancy storage
//! - [`RobotGeometry`]: Footprint in cells and its anchoring rule
//! - [`ConfigurationSpace`]: Inflated grid, free-neighbor queries, pose checks
//! - [`MapDefinition`] / [`MapId`]: Named grid with its start and goal
//!
//! ## Example
//!
//! ```rust,ignore
//! use vastu_plan::grid::{ConfigurationSpace, Grid, RobotGeometry};
//!
//! let grid = Grid::from_ascii("....\n.#..\n....\n")?;
//! let space = ConfigurationSpace::inflate(&grid, RobotGeometry::new(2, 2))?;
//! assert!(!space.is_free(Pose::new(0, 0)));
//! ```

mod config;
mod inflation;
mod map;
mod storage;

pub use config::RobotGeometry;
pub use inflation::ConfigurationSpace;
pub use map::{MapDefinition, MapId};
pub use storage::{CellCounts, Grid};
