//! Grid storage for the binary occupancy grid.
//!
//! One contiguous row-major array of [`CellState`](crate::core::CellState):
//!
//! ```text
//! row 0: [c00 c01 c02 ... c0n]
//! row 1: [c10 c11 c12 ... c1n]      index = row * cols + col
//!  ...
//! ```
//!
//! ## Key Types
//!
//! - [`Grid`]: Storage with bounds checks and iteration helpers
//! - [`CellCounts`]: Statistics for each cell state

mod core;
mod types;

pub use self::core::Grid;
pub use types::CellCounts;
