//! Text map format.
//!
//! One grid row per non-blank line, cells separated by whitespace or commas:
//!
//! ```text
//! 0 0 0 0 0
//! 0 2 1 0 3
//! 0 0 1 0 0
//! ```
//!
//! | Token | Meaning          |
//! |-------|------------------|
//! | `0`   | free             |
//! | `1`   | obstacle         |
//! | `2`   | start (free)     |
//! | `3`   | goal (free)      |
//!
//! Exactly one start and one goal are required. The map id is the file stem.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::core::{CellState, Pose};
use crate::error::{PlanError, Result};
use crate::grid::{Grid, MapDefinition, MapId};

const TOKEN_FREE: &str = "0";
const TOKEN_OBSTACLE: &str = "1";
const TOKEN_START: &str = "2";
const TOKEN_GOAL: &str = "3";

/// Suffix appended to the stem of upscaled maps.
pub const HIGHRES_SUFFIX: &str = "_highres";

/// Parse map text.
pub fn parse_map(id: impl Into<MapId>, text: &str) -> Result<MapDefinition> {
    let mut cells = Vec::new();
    let mut rows = 0usize;
    let mut cols: Option<usize> = None;
    let mut start: Option<Pose> = None;
    let mut goal: Option<Pose> = None;

    for (line_idx, line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        let tokens: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            continue;
        }

        match cols {
            None => cols = Some(tokens.len()),
            Some(expected) if expected != tokens.len() => {
                return Err(PlanError::format(
                    line_no,
                    format!(
                        "inconsistent row width: {} cells, expected {}",
                        tokens.len(),
                        expected
                    ),
                ));
            }
            Some(_) => {}
        }

        for (col, token) in tokens.iter().enumerate() {
            let pose = Pose::new(rows as i32, col as i32);
            let state = match *token {
                TOKEN_FREE => CellState::Free,
                TOKEN_OBSTACLE => CellState::Occupied,
                TOKEN_START => {
                    if start.replace(pose).is_some() {
                        return Err(PlanError::format(line_no, "more than one start cell"));
                    }
                    CellState::Free
                }
                TOKEN_GOAL => {
                    if goal.replace(pose).is_some() {
                        return Err(PlanError::format(line_no, "more than one goal cell"));
                    }
                    CellState::Free
                }
                other => {
                    return Err(PlanError::format(
                        line_no,
                        format!("unrecognized symbol '{}'", other),
                    ));
                }
            };
            cells.push(state);
        }
        rows += 1;
    }

    let cols = cols.ok_or_else(|| PlanError::format(0, "map is empty"))?;
    let start = start.ok_or_else(|| PlanError::format(0, "map has no start cell"))?;
    let goal = goal.ok_or_else(|| PlanError::format(0, "map has no goal cell"))?;
    let grid = Grid::from_cells(rows, cols, cells)?;

    Ok(MapDefinition::new(id, grid, start, goal))
}

/// Load a map file. The id is the file stem.
pub fn load_map(path: &Path) -> Result<MapDefinition> {
    if !path.is_file() {
        return Err(PlanError::MapNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        PlanError::format(line, "map text is not valid UTF-8")
    })?;
    let id = map_id_for(path);
    let map = parse_map(id, &text)?;
    debug!(
        "[MapLoader] Loaded '{}' ({}x{}, start {}, goal {})",
        map.id,
        map.rows(),
        map.cols(),
        map.start,
        map.goal
    );
    Ok(map)
}

/// Load every `*.txt` map in `dir`, sorted by file name.
pub fn load_map_dir(dir: &Path) -> Result<Vec<MapDefinition>> {
    if !dir.is_dir() {
        return Err(PlanError::MapNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let maps = paths
        .iter()
        .map(|p| load_map(p))
        .collect::<Result<Vec<_>>>()?;
    info!("[MapLoader] Loaded {} maps from {}", maps.len(), dir.display());
    Ok(maps)
}

/// Serialize a map back to space-separated text.
pub fn format_map(map: &MapDefinition) -> String {
    let mut out = String::with_capacity(map.rows() * (map.cols() * 2 + 1));
    for row in 0..map.rows() {
        let tokens: Vec<&str> = (0..map.cols())
            .map(|col| {
                let pose = Pose::new(row as i32, col as i32);
                if pose == map.start {
                    TOKEN_START
                } else if pose == map.goal {
                    TOKEN_GOAL
                } else if map.grid.is_occupied(pose) {
                    TOKEN_OBSTACLE
                } else {
                    TOKEN_FREE
                }
            })
            .collect();
        out.push_str(&tokens.join(" "));
        out.push('\n');
    }
    out
}

/// Write a map file.
pub fn write_map(map: &MapDefinition, path: &Path) -> Result<()> {
    fs::write(path, format_map(map))?;
    Ok(())
}

/// Repeat every cell `factor × factor` times.
///
/// Start and goal become the top-left cell of their block; the rest of the
/// block is free. The id gains the `_highres` suffix.
pub fn upscale(map: &MapDefinition, factor: usize) -> Result<MapDefinition> {
    if factor == 0 {
        return Err(PlanError::InvalidConfig(
            "upscale factor must be at least 1".to_string(),
        ));
    }

    let (rows, cols) = (map.rows() * factor, map.cols() * factor);
    let mut cells = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let source = Pose::new((r / factor) as i32, (c / factor) as i32);
            cells.push(map.grid.get(source).unwrap_or(CellState::Occupied));
        }
    }

    let scale = |pose: Pose| Pose::new(pose.row * factor as i32, pose.col * factor as i32);
    Ok(MapDefinition::new(
        format!("{}{}", map.id, HIGHRES_SUFFIX),
        Grid::from_cells(rows, cols, cells)?,
        scale(map.start),
        scale(map.goal),
    ))
}

/// Upscale every map in `dir` that is not already upscaled, writing
/// `<stem>_highres.txt` next to it. Returns the written paths.
pub fn upscale_dir(dir: &Path, factor: usize) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for map in load_map_dir(dir)? {
        if map.id.as_str().ends_with(HIGHRES_SUFFIX) {
            continue;
        }
        let scaled = upscale(&map, factor)?;
        let path = dir.join(format!("{}.txt", scaled.id));
        write_map(&scaled, &path)?;
        info!("[MapLoader] Wrote {} ({}x{})", path.display(), scaled.rows(), scaled.cols());
        written.push(path);
    }
    Ok(written)
}

fn map_id_for(path: &Path) -> MapId {
    MapId::new(
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0 0 0 0\n2 1 0 3\n0 1 0 0\n";

    #[test]
    fn test_parse_sample() {
        let map = parse_map("sample", SAMPLE).unwrap();
        assert_eq!(map.id.as_str(), "sample");
        assert_eq!((map.rows(), map.cols()), (3, 4));
        assert_eq!(map.start, Pose::new(1, 0));
        assert_eq!(map.goal, Pose::new(1, 3));
        assert!(map.grid.is_free(map.start));
        assert!(map.grid.is_free(map.goal));
        assert_eq!(map.grid.count_by_state().occupied, 2);
    }

    #[test]
    fn test_parse_commas_and_blank_lines() {
        let map = parse_map("csv", "\n2,0,0\n\n0,1,3\n").unwrap();
        assert_eq!((map.rows(), map.cols()), (2, 3));
        assert_eq!(map.goal, Pose::new(1, 2));
    }

    #[test]
    fn test_format_errors() {
        let err = parse_map("bad", "2 0 0\n0 0\n3 0 0\n").unwrap_err();
        assert!(matches!(err, PlanError::MapFormat { line: 2, .. }));

        let err = parse_map("bad", "2 0 x\n0 0 3\n").unwrap_err();
        assert!(err.to_string().contains("unrecognized symbol 'x'"));

        assert!(parse_map("bad", "0 0\n0 3\n").is_err());
        assert!(parse_map("bad", "2 2\n0 3\n").is_err());
        assert!(parse_map("bad", "\n\n").is_err());
    }

    #[test]
    fn test_format_roundtrip() {
        let map = parse_map("sample", SAMPLE).unwrap();
        assert_eq!(format_map(&map), SAMPLE);
    }

    #[test]
    fn test_upscale() {
        let map = parse_map("tiny", "2 1\n0 3\n").unwrap();
        let big = upscale(&map, 2).unwrap();

        assert_eq!(big.id.as_str(), "tiny_highres");
        assert_eq!((big.rows(), big.cols()), (4, 4));
        assert_eq!(big.start, Pose::new(0, 0));
        assert_eq!(big.goal, Pose::new(2, 2));
        assert_eq!(
            big.grid.to_ascii(),
            Grid::from_ascii("..##\n..##\n....\n....\n")
                .unwrap()
                .to_ascii()
        );
        assert!(upscale(&map, 0).is_err());
    }

    #[test]
    fn test_load_missing_map() {
        let err = load_map(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, PlanError::MapNotFound { .. }));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), SAMPLE).unwrap();
        fs::write(dir.path().join("a.txt"), "2 3\n").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let maps = load_map_dir(dir.path()).unwrap();
        let ids: Vec<&str> = maps.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let written = upscale_dir(dir.path(), 2).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("a_highres.txt").is_file());

        // Re-running skips maps that are already upscaled
        let maps = load_map_dir(dir.path()).unwrap();
        assert_eq!(maps.len(), 4);
        let written = upscale_dir(dir.path(), 2).unwrap();
        assert_eq!(written.len(), 2);
    }
}
