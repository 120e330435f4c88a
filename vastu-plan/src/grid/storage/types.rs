//! Types used by grid storage.

use serde::{Deserialize, Serialize};

/// Cell counts by state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    /// Free cells.
    pub free: usize,
    /// Occupied cells.
    pub occupied: usize,
}

impl CellCounts {
    /// Total cells.
    pub fn total(&self) -> usize {
        self.free + self.occupied
    }

    /// Fraction of cells that are occupied (0.0 for an empty grid).
    pub fn occupancy_ratio(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.occupied as f64 / self.total() as f64
        }
    }
}
