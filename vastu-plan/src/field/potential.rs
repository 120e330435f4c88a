//! Attractive/repulsive potential over the configuration space.

use log::debug;

use crate::core::Pose;
use crate::error::Result;
use crate::grid::ConfigurationSpace;

use super::config::FieldConfig;

/// Scalar potential, one value per configuration-space cell.
///
/// Occupied cells hold `f64::INFINITY` so they never win a comparison. The
/// goal carries no repulsive term: its value is exactly 0 and every other
/// free cell is strictly positive.
///
/// Repulsion comes from poses whose footprint covers a source obstacle.
/// Poses blocked only by the grid edge are `+∞` but do not repel.
#[derive(Clone, Debug, PartialEq)]
pub struct PotentialField {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
    goal: Pose,
}

impl PotentialField {
    /// Compute the field for `goal` over `space`.
    ///
    /// Fails if the configuration is invalid or the goal is not a free pose.
    /// Cost is O(free cells × cells within the influence radius).
    pub fn compute(space: &ConfigurationSpace, goal: Pose, config: &FieldConfig) -> Result<Self> {
        config.validate()?;
        space.check_pose(goal, "goal")?;

        let kernel = repulsion_kernel(config);
        let (rows, cols) = (space.rows(), space.cols());
        let mut values = vec![f64::INFINITY; rows * cols];

        for r in 0..rows {
            for c in 0..cols {
                let pose = Pose::new(r as i32, c as i32);
                if !space.is_free(pose) {
                    continue;
                }

                let attractive = config.attract_gain * pose.distance(&goal);
                let repulsive = if pose == goal {
                    0.0
                } else {
                    kernel
                        .iter()
                        .filter(|(dr, dc, _)| space.touches_obstacle(pose.offset(*dr, *dc)))
                        .map(|(_, _, weight)| weight)
                        .sum()
                };

                values[r * cols + c] = attractive + repulsive;
            }
        }

        let field = Self {
            values,
            rows,
            cols,
            goal,
        };
        if let Some((lo, hi)) = field.finite_range() {
            debug!(
                "[Field] Goal {} on {}x{}: potential range [{:.2}, {:.2}], {} kernel offsets",
                goal,
                rows,
                cols,
                lo,
                hi,
                kernel.len()
            );
        }
        Ok(field)
    }

    /// Potential at `pose` (`INFINITY` if occupied or outside the grid).
    #[inline]
    pub fn value(&self, pose: Pose) -> f64 {
        if pose.row < 0
            || pose.col < 0
            || pose.row as usize >= self.rows
            || pose.col as usize >= self.cols
        {
            return f64::INFINITY;
        }
        self.values[pose.row as usize * self.cols + pose.col as usize]
    }

    /// Goal the field was computed for.
    #[inline]
    pub fn goal(&self) -> Pose {
        self.goal
    }

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

    /// Raw row-major values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Smallest and largest finite value, or `None` if every cell is occupied.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Offsets within the influence radius and their repulsive weight.
fn repulsion_kernel(config: &FieldConfig) -> Vec<(i32, i32, f64)> {
    let reach = config.influence_radius.floor() as i32;
    let mut kernel = Vec::new();
    for dr in -reach..=reach {
        for dc in -reach..=reach {
            if dr == 0 && dc == 0 {
                continue;
            }
            let d = ((dr * dr + dc * dc) as f64).sqrt();
            if d <= config.influence_radius {
                kernel.push((dr, dc, config.repulse_gain * (-d).exp()));
            }
        }
    }
    kernel
}
