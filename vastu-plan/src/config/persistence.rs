//! Persistence configuration section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Where maps are read from and models/renderings are written to
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistenceSection {
    /// Directory of `*.txt` map files
    #[serde(default = "defaults::map_dir")]
    pub map_dir: String,

    /// Trained Q-table artifact
    #[serde(default = "defaults::model_path")]
    pub model_path: String,

    /// Output directory for SVG renderings
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// Factor used by the `upscale` command
    #[serde(default = "defaults::upscale_factor")]
    pub upscale_factor: usize,
}

impl Default for PersistenceSection {
    fn default() -> Self {
        Self {
            map_dir: defaults::map_dir(),
            model_path: defaults::model_path(),
            output_dir: defaults::output_dir(),
            upscale_factor: defaults::upscale_factor(),
        }
    }
}

impl PersistenceSection {
    /// Map directory as a path
    pub fn map_dir(&self) -> PathBuf {
        PathBuf::from(&self.map_dir)
    }

    /// Model artifact as a path
    pub fn model_path(&self) -> PathBuf {
        PathBuf::from(&self.model_path)
    }

    /// Output directory as a path
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }
}
