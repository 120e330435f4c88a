//! Test utilities for VastuPlan integration tests.
//!
//! Builders for small maps with known shapes and seeded RNGs.

#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use vastu_plan::io::parse_map;
use vastu_plan::{Grid, MapDefinition, Pose};

/// Seeded generator for reproducible runs.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// All-free map.
pub fn open_map(rows: usize, cols: usize, start: Pose, goal: Pose) -> MapDefinition {
    MapDefinition::new(format!("open{}x{}", rows, cols), Grid::new(rows, cols), start, goal)
}

/// 9x12 map with a U-shaped wall opening towards the start.
///
/// ```text
/// ............
/// ............
/// ....#####...
/// ........#...
/// .S......#..G
/// ........#...
/// ....#####...
/// ............
/// ............
/// ```
///
/// Straight descent from S runs into the pocket and stalls at (4, 6).
pub fn u_trap_map() -> MapDefinition {
    let mut grid = Grid::new(9, 12);
    grid.fill_rect(Pose::new(2, 4), Pose::new(2, 8));
    grid.fill_rect(Pose::new(6, 4), Pose::new(6, 8));
    grid.fill_rect(Pose::new(2, 8), Pose::new(6, 8));
    MapDefinition::new("u_trap", grid, Pose::new(4, 1), Pose::new(4, 11))
}

/// 8x10 map with scattered blocks, usable with robots up to 2x2.
pub fn cluttered_map() -> MapDefinition {
    let text = "\
2 0 0 0 0 0 0 0 0 0
0 0 0 1 0 0 0 0 0 0
0 0 0 1 0 0 1 1 0 0
0 0 0 0 0 0 0 0 0 0
0 1 1 0 0 0 0 0 0 0
0 0 0 0 0 0 1 0 0 0
0 0 0 0 0 0 1 0 3 0
0 0 0 0 0 0 0 0 0 0";
    parse_map("cluttered", text).unwrap()
}

/// Free cells of a map in row-major order.
pub fn free_cells(map: &MapDefinition) -> Vec<Pose> {
    map.grid.free_poses().collect()
}

/// 4-connected shortest path length over free cells, `None` when unreachable.
pub fn bfs_distance(map: &MapDefinition, start: Pose, goal: Pose) -> Option<usize> {
    use std::collections::VecDeque;

    let mut dist = vec![usize::MAX; map.grid.cell_count()];
    let mut queue = VecDeque::new();
    dist[map.grid.index(start)?] = 0;
    queue.push_back(start);

    while let Some(pose) = queue.pop_front() {
        let d = dist[map.grid.index(pose)?];
        if pose == goal {
            return Some(d);
        }
        for next in pose.neighbors_4() {
            if let Some(i) = map.grid.index(next)
                && map.grid.is_free(next)
                && dist[i] == usize::MAX
            {
                dist[i] = d + 1;
                queue.push_back(next);
            }
        }
    }
    None
}
