//! Error types for VastuPlan.
//!
//! Input and configuration problems surface as [`PlanError`] before any
//! stepping begins. A robot that cannot reach its goal is not an error: the
//! planners report it through [`crate::core::PlanStatus::Failure`].

use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, PlanError>;

/// VastuPlan error types
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Map file does not exist
    #[error("Map not found: {}", path.display())]
    MapNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// Map text is malformed
    #[error("Map format error at line {line}: {reason}")]
    MapFormat {
        /// 1-based line number (0 when the problem is not tied to a line)
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Robot geometry or start/goal placement cannot be planned over
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Planner parameter outside its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Trained model is missing or unreadable
    #[error("Model not trained: {0} (train a model first)")]
    ModelNotTrained(String),

    /// Q-table has no entries for this map
    #[error("Map '{0}' is not part of the trained model")]
    UnknownMap(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlanError {
    /// Shorthand for a map format error.
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        PlanError::MapFormat {
            line,
            reason: reason.into(),
        }
    }
}
