//! Grid storage core implementation.

use crate::core::{CellState, Pose};
use crate::error::{PlanError, Result};

use super::types::CellCounts;

/// Row-major binary occupancy grid.
///
/// The grid uses a coordinate system where:
/// - (0, 0) is the top-left cell (first token of the first map row)
/// - Rows grow downwards, columns grow to the right
/// - Cell (row, col) lives at index `row * cols + col`
///
/// Planners only ever hold `&Grid`; once a map is loaded it is not mutated
/// during a planning session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub(super) cells: Vec<CellState>,
    pub(super) rows: usize,
    pub(super) cols: usize,
}

impl Grid {
    // === Constructors ===

    /// Create an all-free grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, CellState::Free)
    }

    /// Create a grid with every cell set to `state`.
    pub fn filled(rows: usize, cols: usize, state: CellState) -> Self {
        Self {
            cells: vec![state; rows * cols],
            rows,
            cols,
        }
    }

    /// Build a grid from row-major cells.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<CellState>) -> Result<Self> {
        if cells.len() != rows * cols {
            return Err(PlanError::format(
                0,
                format!(
                    "expected {} cells for a {}x{} grid, got {}",
                    rows * cols,
                    rows,
                    cols,
                    cells.len()
                ),
            ));
        }
        Ok(Self { cells, rows, cols })
    }

    /// Parse a debug picture of the grid: `#` is occupied, `.` is free.
    ///
    /// Blank lines and surrounding whitespace are ignored. Mostly useful in
    /// tests and benchmarks.
    pub fn from_ascii(picture: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let mut rows = 0;
        let mut cols = None;

        for (line_idx, line) in picture.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let width = line.chars().count();
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(PlanError::format(
                        line_idx + 1,
                        format!("row has {} cells, expected {}", width, expected),
                    ));
                }
                Some(_) => {}
            }

            for ch in line.chars() {
                let state = match ch {
                    '.' => CellState::Free,
                    '#' => CellState::Occupied,
                    other => {
                        return Err(PlanError::format(
                            line_idx + 1,
                            format!("unrecognized symbol '{}'", other),
                        ));
                    }
                };
                cells.push(state);
            }
            rows += 1;
        }

        let cols = cols.ok_or_else(|| PlanError::format(0, "grid is empty"))?;
        Self::from_cells(rows, cols, cells)
    }

    // === Basic Properties ===

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    // === Coordinate Conversion ===

    /// Check if a pose is within bounds.
    #[inline]
    pub fn in_bounds(&self, pose: Pose) -> bool {
        pose.row >= 0
            && pose.col >= 0
            && (pose.row as usize) < self.rows
            && (pose.col as usize) < self.cols
    }

    /// Convert a pose to a flat array index.
    #[inline]
    pub fn index(&self, pose: Pose) -> Option<usize> {
        if self.in_bounds(pose) {
            Some(pose.row as usize * self.cols + pose.col as usize)
        } else {
            None
        }
    }

    /// Convert a flat array index to a pose.
    #[inline]
    pub fn pose_of(&self, index: usize) -> Pose {
        Pose::new((index / self.cols) as i32, (index % self.cols) as i32)
    }

    // === Cell Access ===

    /// Cell state at a pose (None if out of bounds).
    #[inline]
    pub fn get(&self, pose: Pose) -> Option<CellState> {
        self.index(pose).map(|i| self.cells[i])
    }

    /// Is this pose inside the grid and free?
    #[inline]
    pub fn is_free(&self, pose: Pose) -> bool {
        self.get(pose).is_some_and(CellState::is_free)
    }

    /// Is this pose occupied? Out-of-bounds poses count as occupied.
    #[inline]
    pub fn is_occupied(&self, pose: Pose) -> bool {
        !self.is_free(pose)
    }

    /// Set a cell. Returns false if the pose is out of bounds.
    #[inline]
    pub fn set(&mut self, pose: Pose, state: CellState) -> bool {
        match self.index(pose) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// Mark an axis-aligned block of cells (inclusive corners) as occupied.
    pub fn fill_rect(&mut self, top_left: Pose, bottom_right: Pose) {
        for row in top_left.row..=bottom_right.row {
            for col in top_left.col..=bottom_right.col {
                self.set(Pose::new(row, col), CellState::Occupied);
            }
        }
    }

    /// Raw row-major cells.
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    // === Iterators ===

    /// Iterate over all cells with their poses.
    pub fn iter(&self) -> impl Iterator<Item = (Pose, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &state)| (self.pose_of(i), state))
    }

    /// Iterate over free poses in row-major order.
    pub fn free_poses(&self) -> impl Iterator<Item = Pose> + '_ {
        self.iter()
            .filter(|(_, state)| state.is_free())
            .map(|(pose, _)| pose)
    }

    /// Iterate over occupied poses in row-major order.
    pub fn occupied_poses(&self) -> impl Iterator<Item = Pose> + '_ {
        self.iter()
            .filter(|(_, state)| state.is_occupied())
            .map(|(pose, _)| pose)
    }

    /// Count cells by state.
    pub fn count_by_state(&self) -> CellCounts {
        let occupied = self.cells.iter().filter(|c| c.is_occupied()).count();
        CellCounts {
            free: self.cells.len() - occupied,
            occupied,
        }
    }

    /// Render the grid as `#`/`.` lines (inverse of [`Grid::from_ascii`]).
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.cells.chunks(self.cols.max(1)) {
            out.extend(row.iter().map(|c| c.as_char()));
            out.push('\n');
        }
        out
    }
}
