//! Named maps with fixed start and goal poses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Pose;

use super::storage::Grid;

/// Map identifier (the map file stem, e.g. `scenario3`).
///
/// Every Q-table entry is addressed through one of these so that values
/// learned on different maps never collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapId(String);

impl MapId {
    /// Create an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MapId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MapId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A loaded map: occupancy plus the start and goal marked in the file.
///
/// Start and goal cells are free in `grid`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapDefinition {
    /// Map identifier
    pub id: MapId,
    /// Source occupancy grid (not inflated)
    pub grid: Grid,
    /// Start pose
    pub start: Pose,
    /// Goal pose
    pub goal: Pose,
}

impl MapDefinition {
    /// Bundle a grid with its start and goal.
    pub fn new(id: impl Into<MapId>, grid: Grid, start: Pose, goal: Pose) -> Self {
        Self {
            id: id.into(),
            grid,
            start,
            goal,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_id() {
        let id = MapId::from("scenario1");
        assert_eq!(id.as_str(), "scenario1");
        assert_eq!(id.to_string(), "scenario1");
        assert!(MapId::from("a") < MapId::from("b"));
    }
}
