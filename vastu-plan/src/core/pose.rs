//! Grid poses and neighborhood ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Robot position in the configuration-space grid (integer cell indices).
///
/// Row 0 is the top line of the map file, column 0 its first token.
/// Signed so that neighbor arithmetic at the border can step outside the grid
/// and be rejected by bounds checks instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Row index (grows downwards)
    pub row: i32,
    /// Column index (grows to the right)
    pub col: i32,
}

/// 8-connected offsets, clockwise from north: N, NE, E, SE, S, SW, W, NW.
///
/// The order is the tie-break priority of steepest descent.
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, 1),   // E
    (1, 1),   // SE
    (1, 0),   // S
    (1, -1),  // SW
    (0, -1),  // W
    (-1, -1), // NW
];

/// 4-connected offsets, clockwise from north: N, E, S, W.
pub const NEIGHBORS_4: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

impl Pose {
    /// Create a new pose
    #[inline]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Pose offset by `(d_row, d_col)`
    #[inline]
    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Pose::new(self.row + d_row, self.col + d_col)
    }

    /// Euclidean distance in cells
    #[inline]
    pub fn distance(&self, other: &Pose) -> f64 {
        let dr = (self.row - other.row) as f64;
        let dc = (self.col - other.col) as f64;
        (dr * dr + dc * dc).sqrt()
    }

    /// Manhattan distance (minimal number of 4-connected moves on an open grid)
    #[inline]
    pub fn manhattan_distance(&self, other: &Pose) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Chebyshev distance (minimal number of 8-connected moves on an open grid)
    #[inline]
    pub fn chebyshev_distance(&self, other: &Pose) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }

    /// The 4 cardinal neighbors in priority order (N, E, S, W)
    #[inline]
    pub fn neighbors_4(&self) -> [Pose; 4] {
        NEIGHBORS_4.map(|(dr, dc)| self.offset(dr, dc))
    }

    /// The 8 neighbors in priority order (clockwise from N)
    #[inline]
    pub fn neighbors_8(&self) -> [Pose; 8] {
        NEIGHBORS_8.map(|(dr, dc)| self.offset(dr, dc))
    }

    /// Neighbors for the requested connectivity, in priority order.
    pub fn neighbors(&self, allow_diagonal: bool) -> Vec<Pose> {
        if allow_diagonal {
            self.neighbors_8().to_vec()
        } else {
            self.neighbors_4().to_vec()
        }
    }

    /// Whether `other` is one 8-connected step away
    #[inline]
    pub fn is_adjacent(&self, other: &Pose) -> bool {
        self != other && self.chebyshev_distance(other) == 1
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Pose {
    fn from((row, col): (i32, i32)) -> Self {
        Pose::new(row, col)
    }
}

impl Add for Pose {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Pose::new(self.row + other.row, self.col + other.col)
    }
}

impl Sub for Pose {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Pose::new(self.row - other.row, self.col - other.col)
    }
}

/// Euclidean length of a path in cells (diagonal steps count √2).
pub fn path_length(path: &[Pose]) -> f64 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_neighbor_order_is_clockwise_from_north() {
        let p = Pose::new(5, 5);
        let n = p.neighbors_8();
        assert_eq!(n[0], Pose::new(4, 5)); // N
        assert_eq!(n[1], Pose::new(4, 6)); // NE
        assert_eq!(n[2], Pose::new(5, 6)); // E
        assert_eq!(n[4], Pose::new(6, 5)); // S
        assert_eq!(n[7], Pose::new(4, 4)); // NW

        let n4 = p.neighbors_4();
        assert_eq!(n4, [Pose::new(4, 5), Pose::new(5, 6), Pose::new(6, 5), Pose::new(5, 4)]);
    }

    #[test]
    fn test_distances() {
        let a = Pose::new(0, 0);
        let b = Pose::new(3, 4);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(a.chebyshev_distance(&b), 4);
    }

    #[test]
    fn test_adjacency() {
        let p = Pose::new(2, 2);
        assert!(p.is_adjacent(&Pose::new(3, 3)));
        assert!(!p.is_adjacent(&p));
        assert!(!p.is_adjacent(&Pose::new(4, 2)));
    }

    #[test]
    fn test_path_length() {
        let path = vec![Pose::new(0, 0), Pose::new(0, 1), Pose::new(1, 2)];
        assert_relative_eq!(path_length(&path), 1.0 + std::f64::consts::SQRT_2);
        assert_eq!(path_length(&[]), 0.0);
    }
}
