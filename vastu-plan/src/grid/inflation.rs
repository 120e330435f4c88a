//! Configuration-space inflation.
//!
//! Reduces a rectangular robot to a point by marking every pose whose
//! footprint touches an obstacle (or hangs over the grid edge) as occupied.
//! The footprint test for every pose is a constant-time rectangle sum over a
//! summed-area table of the source grid.
//!
//! A pose can be occupied for two reasons: the footprint covers a source
//! obstacle, or it only hangs over the edge. The space remembers which poses
//! are of the first kind so the potential field repels from real obstacles
//! only.

use log::debug;

use crate::core::{CellState, Pose};
use crate::error::{PlanError, Result};

use super::config::RobotGeometry;
use super::storage::Grid;

/// Integral image of occupied cells, padded by one row and column.
///
/// `sums[(r + 1) * (cols + 1) + (c + 1)]` holds the number of occupied cells
/// in rows `0..=r`, cols `0..=c`.
struct SummedAreaTable {
    sums: Vec<u32>,
    stride: usize,
}

impl SummedAreaTable {
    fn build(grid: &Grid) -> Self {
        let stride = grid.cols() + 1;
        let mut sums = vec![0u32; (grid.rows() + 1) * stride];

        for r in 0..grid.rows() {
            let mut row_sum = 0u32;
            for c in 0..grid.cols() {
                if grid.cells()[r * grid.cols() + c].is_occupied() {
                    row_sum += 1;
                }
                sums[(r + 1) * stride + (c + 1)] = sums[r * stride + (c + 1)] + row_sum;
            }
        }

        Self { sums, stride }
    }

    /// Occupied cells in the inclusive rectangle `[r0, r1] × [c0, c1]`.
    #[inline]
    fn count(&self, r0: usize, c0: usize, r1: usize, c1: usize) -> u32 {
        let at = |r: usize, c: usize| self.sums[r * self.stride + c];
        at(r1 + 1, c1 + 1) + at(r0, c0) - at(r0, c1 + 1) - at(r1 + 1, c0)
    }
}

/// Obstacle map for a point robot, derived from a [`Grid`] and a
/// [`RobotGeometry`].
///
/// Same dimensions as the source grid. Immutable once built; the planning
/// session caches one per geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigurationSpace {
    grid: Grid,
    geometry: RobotGeometry,
    /// Per cell: the footprint, clipped to the grid, covers a source obstacle.
    touches_obstacle: Vec<bool>,
}

impl ConfigurationSpace {
    /// Inflate `grid` by the robot footprint.
    ///
    /// Fails with [`PlanError::InvalidGeometry`] for a zero-sized robot or a
    /// robot that does not fit in the grid.
    pub fn inflate(grid: &Grid, geometry: RobotGeometry) -> Result<Self> {
        geometry.validate(grid.rows(), grid.cols())?;

        let (rows, cols) = (grid.rows(), grid.cols());
        let (lo_r, lo_c) = geometry.lower_extent();
        let (hi_r, hi_c) = geometry.upper_extent();
        let table = SummedAreaTable::build(grid);

        let mut cells = Vec::with_capacity(rows * cols);
        let mut touches_obstacle = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let inside = r >= lo_r && c >= lo_c && r + hi_r < rows && c + hi_c < cols;
                let touches = table.count(
                    r.saturating_sub(lo_r),
                    c.saturating_sub(lo_c),
                    (r + hi_r).min(rows - 1),
                    (c + hi_c).min(cols - 1),
                ) > 0;
                touches_obstacle.push(touches);
                cells.push(if !inside || touches {
                    CellState::Occupied
                } else {
                    CellState::Free
                });
            }
        }

        let grid = Grid::from_cells(rows, cols, cells)?;
        let counts = grid.count_by_state();
        debug!(
            "[CSpace] Inflated {}x{} grid for {} robot: {} free, {} occupied",
            rows, cols, geometry, counts.free, counts.occupied
        );

        Ok(Self {
            grid,
            geometry,
            touches_obstacle,
        })
    }

    /// Inflated occupancy as a plain grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Footprint this space was inflated for.
    #[inline]
    pub fn geometry(&self) -> RobotGeometry {
        self.geometry
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Can the robot stand at this pose? False outside the grid.
    #[inline]
    pub fn is_free(&self, pose: Pose) -> bool {
        self.grid.is_free(pose)
    }

    /// Does the footprint at `pose` cover an obstacle of the source grid?
    ///
    /// Poses blocked only by the grid edge answer false. False outside the
    /// grid.
    #[inline]
    pub fn touches_obstacle(&self, pose: Pose) -> bool {
        self.grid
            .index(pose)
            .is_some_and(|idx| self.touches_obstacle[idx])
    }

    /// Free neighbors of `pose`, in neighbor priority order.
    pub fn free_neighbors(&self, pose: Pose, allow_diagonal: bool) -> Vec<Pose> {
        pose.neighbors(allow_diagonal)
            .into_iter()
            .filter(|&n| self.is_free(n))
            .collect()
    }

    /// Fail with [`PlanError::InvalidGeometry`] unless the robot can stand at
    /// `pose`. `label` names the pose in the message ("start", "goal").
    pub fn check_pose(&self, pose: Pose, label: &str) -> Result<()> {
        if !self.grid.in_bounds(pose) {
            return Err(PlanError::InvalidGeometry(format!(
                "{} {} is outside the {}x{} grid",
                label,
                pose,
                self.rows(),
                self.cols()
            )));
        }
        if !self.is_free(pose) {
            return Err(PlanError::InvalidGeometry(format!(
                "{} {} is inside an inflated obstacle for a {} robot",
                label, pose, self.geometry
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_robot_matches_grid() {
        let grid = Grid::from_ascii(
            "
            .....
            .#...
            ...#.
            ",
        )
        .unwrap();
        let space = ConfigurationSpace::inflate(&grid, RobotGeometry::point()).unwrap();
        assert_eq!(space.grid(), &grid);
    }

    #[test]
    fn test_inflation_around_single_obstacle() {
        let mut grid = Grid::new(7, 7);
        grid.set(Pose::new(3, 3), CellState::Occupied);

        let space = ConfigurationSpace::inflate(&grid, RobotGeometry::new(3, 3)).unwrap();
        let expected = Grid::from_ascii(
            "
            #######
            #.....#
            #.###.#
            #.###.#
            #.###.#
            #.....#
            #######
            ",
        )
        .unwrap();
        assert_eq!(space.grid(), &expected);
    }

    #[test]
    fn test_even_footprint_extends_down_right() {
        let grid = Grid::new(3, 3);
        let space = ConfigurationSpace::inflate(&grid, RobotGeometry::new(2, 2)).unwrap();
        let expected = Grid::from_ascii(
            "
            ..#
            ..#
            ###
            ",
        )
        .unwrap();
        assert_eq!(space.grid(), &expected);
    }

    #[test]
    fn test_edge_band_does_not_touch_obstacles() {
        let mut grid = Grid::new(6, 6);
        grid.set(Pose::new(0, 2), CellState::Occupied);
        let space = ConfigurationSpace::inflate(&grid, RobotGeometry::new(3, 3)).unwrap();

        // Blocked by the top edge and by the obstacle
        assert!(!space.is_free(Pose::new(0, 2)));
        assert!(space.touches_obstacle(Pose::new(0, 2)));
        assert!(space.touches_obstacle(Pose::new(1, 3)));

        // Blocked by the edge only
        assert!(!space.is_free(Pose::new(5, 5)));
        assert!(!space.touches_obstacle(Pose::new(5, 5)));
        assert!(!space.touches_obstacle(Pose::new(0, 5)));

        assert!(!space.touches_obstacle(Pose::new(-1, 0)));
    }

    #[test]
    fn test_free_neighbors_order() {
        let grid = Grid::from_ascii(
            "
            .#.
            ...
            ...
            ",
        )
        .unwrap();
        let space = ConfigurationSpace::inflate(&grid, RobotGeometry::point()).unwrap();
        let center = Pose::new(1, 1);

        let diag = space.free_neighbors(center, true);
        assert_eq!(diag.first(), Some(&Pose::new(0, 2)));
        assert_eq!(diag.len(), 7);

        let cardinal = space.free_neighbors(center, false);
        assert_eq!(
            cardinal,
            vec![Pose::new(1, 2), Pose::new(2, 1), Pose::new(1, 0)]
        );
    }

    #[test]
    fn test_check_pose() {
        let grid = Grid::from_ascii(
            "
            ....
            .#..
            ....
            ",
        )
        .unwrap();
        let space = ConfigurationSpace::inflate(&grid, RobotGeometry::point()).unwrap();
        assert!(space.check_pose(Pose::new(0, 0), "start").is_ok());

        let err = space.check_pose(Pose::new(1, 1), "goal").unwrap_err();
        assert!(err.to_string().contains("goal"));
        assert!(matches!(
            space.check_pose(Pose::new(5, 0), "start"),
            Err(PlanError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_robot() {
        let grid = Grid::new(3, 3);
        assert!(matches!(
            ConfigurationSpace::inflate(&grid, RobotGeometry::new(4, 1)),
            Err(PlanError::InvalidGeometry(_))
        ));
    }
}
