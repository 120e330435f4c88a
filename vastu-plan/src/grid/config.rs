//! Robot footprint configuration for configuration-space inflation.

use crate::config::defaults;
use crate::error::{PlanError, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned robot footprint in grid cells.
///
/// The footprint is anchored at the pose cell. For a robot `w` cells wide
/// and `h` cells tall standing at `(r, c)` it covers
///
/// ```text
/// rows  r - (h-1)/2 ..= r + h/2
/// cols  c - (w-1)/2 ..= c + w/2
/// ```
///
/// so odd sizes are centered and even sizes extend one extra cell towards
/// the bottom/right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RobotGeometry {
    /// Width in cells (columns covered)
    #[serde(default = "defaults::robot_extent")]
    pub width: usize,

    /// Height in cells (rows covered)
    #[serde(default = "defaults::robot_extent")]
    pub height: usize,
}

impl Default for RobotGeometry {
    fn default() -> Self {
        Self {
            width: defaults::robot_extent(),
            height: defaults::robot_extent(),
        }
    }
}

impl RobotGeometry {
    /// Create a footprint of `width × height` cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Single-cell robot. Its configuration space equals the source grid.
    pub fn point() -> Self {
        Self::new(1, 1)
    }

    /// Footprint cells above / left of the pose cell: `(rows, cols)`.
    #[inline]
    pub fn lower_extent(&self) -> (usize, usize) {
        (
            self.height.saturating_sub(1) / 2,
            self.width.saturating_sub(1) / 2,
        )
    }

    /// Footprint cells below / right of the pose cell: `(rows, cols)`.
    #[inline]
    pub fn upper_extent(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }

    /// Reject zero-sized robots and robots that cannot fit inside the grid.
    pub fn validate(&self, rows: usize, cols: usize) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlanError::InvalidGeometry(format!(
                "robot footprint {}x{} has a zero extent",
                self.width, self.height
            )));
        }
        if self.height > rows || self.width > cols {
            return Err(PlanError::InvalidGeometry(format!(
                "robot footprint {}x{} is larger than the {}x{} grid",
                self.width, self.height, cols, rows
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for RobotGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
