//! Cell states for the occupancy grid.

use serde::{Deserialize, Serialize};

/// Binary occupancy of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Navigable space
    #[default]
    Free = 0,

    /// Obstacle (or, in configuration space, a pose the footprint cannot take)
    Occupied = 1,
}

impl CellState {
    /// Can the robot stand here?
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, CellState::Free)
    }

    /// Is this cell blocked?
    #[inline]
    pub fn is_occupied(self) -> bool {
        matches!(self, CellState::Occupied)
    }

    /// Convert from u8 (anything non-zero is occupied)
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        if value == 0 {
            CellState::Free
        } else {
            CellState::Occupied
        }
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Occupied => '#',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_state() {
        assert!(CellState::Free.is_free());
        assert!(CellState::Occupied.is_occupied());
        assert_eq!(CellState::default(), CellState::Free);
        assert_eq!(CellState::from_u8(0), CellState::Free);
        assert_eq!(CellState::from_u8(7), CellState::Occupied);
        assert_eq!(CellState::Occupied.as_char(), '#');
    }
}
