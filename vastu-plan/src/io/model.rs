//! Binary persistence for trained Q-tables.
//!
//! Format (all integers and floats little-endian):
//! - Header:
//!   - Magic: "VQTAB" (5 bytes)
//!   - Version: u8 (1 byte)
//!   - Map count: u32 (4 bytes)
//! - Per map, in sorted id order:
//!   - Id length: u32, then the UTF-8 id bytes
//!   - Rows: u32
//!   - Cols: u32
//!   - Values: rows × cols × 4 f64 (row-major, actions Up, Down, Left, Right)
//!
//! Any failure to read a model (missing file, bad magic, truncated data)
//! surfaces as [`PlanError::ModelNotTrained`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;

use crate::error::{PlanError, Result};
use crate::grid::MapId;
use crate::rl::{Action, ActionValues, QTable};

/// Magic bytes for model files
const MAGIC: &[u8; 5] = b"VQTAB";

/// Current format version
const VERSION: u8 = 1;

/// Longest accepted map id
const MAX_ID_LEN: usize = 4096;

/// Largest accepted map (cells)
const MAX_CELLS: usize = 1 << 24;

/// Save a table to a model file.
pub fn save_model(table: &QTable, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_model(table, &mut writer)?;
    writer.flush()?;
    info!("[Model] Saved {} maps to {}", table.len(), path.display());
    Ok(())
}

/// Write a table to any writer.
pub fn write_model<W: Write>(table: &QTable, writer: &mut W) -> Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_all(&[VERSION])?;
    writer.write_all(&(table.len() as u32).to_le_bytes())?;

    for (id, values) in table.iter() {
        let id_bytes = id.as_str().as_bytes();
        writer.write_all(&(id_bytes.len() as u32).to_le_bytes())?;
        writer.write_all(id_bytes)?;
        writer.write_all(&(values.rows() as u32).to_le_bytes())?;
        writer.write_all(&(values.cols() as u32).to_le_bytes())?;

        let mut buf = Vec::with_capacity(values.raw().len() * 8);
        for v in values.raw() {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        writer.write_all(&buf)?;
    }
    Ok(())
}

/// Load a table from a model file.
pub fn load_model(path: &Path) -> Result<QTable> {
    let file = File::open(path).map_err(|e| {
        PlanError::ModelNotTrained(format!("cannot open {}: {}", path.display(), e))
    })?;
    let table = read_model(&mut BufReader::new(file))?;
    info!("[Model] Loaded {} maps from {}", table.len(), path.display());
    Ok(table)
}

/// Read a table from any reader.
pub fn read_model<R: Read>(reader: &mut R) -> Result<QTable> {
    let mut magic = [0u8; 5];
    read_exact(reader, &mut magic, "header")?;
    if &magic != MAGIC {
        return Err(corrupt("invalid magic bytes"));
    }

    let mut version = [0u8; 1];
    read_exact(reader, &mut version, "header")?;
    if version[0] != VERSION {
        return Err(corrupt(format!(
            "version mismatch: expected {}, found {}",
            VERSION, version[0]
        )));
    }

    let map_count = read_u32(reader, "map count")? as usize;
    let mut table = QTable::new();

    for _ in 0..map_count {
        let id_len = read_u32(reader, "id length")? as usize;
        if id_len > MAX_ID_LEN {
            return Err(corrupt(format!("map id length {} is implausible", id_len)));
        }
        let mut id_bytes = vec![0u8; id_len];
        read_exact(reader, &mut id_bytes, "map id")?;
        let id = String::from_utf8(id_bytes).map_err(|_| corrupt("map id is not UTF-8"))?;

        let rows = read_u32(reader, "rows")? as usize;
        let cols = read_u32(reader, "cols")? as usize;
        let cells = rows
            .checked_mul(cols)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or_else(|| corrupt(format!("map '{}' has implausible size {}x{}", id, rows, cols)))?;

        let mut raw = vec![0u8; cells * Action::COUNT * 8];
        read_exact(reader, &mut raw, "values")?;
        let values: Vec<f64> = raw
            .chunks_exact(8)
            .map(|chunk| {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(chunk);
                f64::from_le_bytes(bytes)
            })
            .collect();

        let block = ActionValues::from_raw(rows, cols, values)
            .ok_or_else(|| corrupt(format!("map '{}' has the wrong number of values", id)))?;
        table.insert_map(MapId::new(id), block);
    }

    Ok(table)
}

fn corrupt(reason: impl Into<String>) -> PlanError {
    PlanError::ModelNotTrained(format!("corrupt model: {}", reason.into()))
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader
        .read_exact(buf)
        .map_err(|e| corrupt(format!("truncated {}: {}", what, e)))
}

fn read_u32<R: Read>(reader: &mut R, what: &str) -> Result<u32> {
    let mut bytes = [0u8; 4];
    read_exact(reader, &mut bytes, what)?;
    Ok(u32::from_le_bytes(bytes))
}
