//! Grid-world action set.

use serde::{Deserialize, Serialize};

use crate::core::Pose;

/// One-cell move.
///
/// The declaration order is the tie-break priority for greedy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    /// Row - 1
    Up = 0,
    /// Row + 1
    Down = 1,
    /// Col - 1
    Left = 2,
    /// Col + 1
    Right = 3,
}

impl Action {
    /// Number of actions
    pub const COUNT: usize = 4;

    /// All actions in priority order
    pub const ALL: [Action; Action::COUNT] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Slot in a per-state value row
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Action stored in slot `index`
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// `(d_row, d_col)` of the move
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// Pose the move targets (may be outside the grid)
    #[inline]
    pub fn apply(self, pose: Pose) -> Pose {
        let (dr, dc) = self.delta();
        pose.offset(dr, dc)
    }

    /// Action name for logging
    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "Up",
            Action::Down => "Down",
            Action::Left => "Left",
            Action::Right => "Right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip_and_delta() {
        for action in Action::ALL {
            assert_eq!(Action::from_index(action.index()), Some(action));
        }
        assert_eq!(Action::from_index(4), None);
        assert_eq!(Action::Up.apply(Pose::new(2, 2)), Pose::new(1, 2));
        assert_eq!(Action::Right.apply(Pose::new(2, 2)), Pose::new(2, 3));
    }

    #[test]
    fn test_names_follow_tie_break_order() {
        let names: Vec<&str> = Action::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names, ["Up", "Down", "Left", "Right"]);
    }
}
