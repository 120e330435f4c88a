//! Failures while reading a planner configuration file.

use std::path::PathBuf;

/// Config file could not be read or parsed
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// File missing or unreadable
    #[error("Cannot read config {}: {source}", path.display())]
    Io {
        /// Config file that was requested
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// YAML is malformed or has fields of the wrong type
    #[error("Invalid planner config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
