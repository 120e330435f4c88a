//! Map files, model persistence and visualization.
//!
//! - **Text maps**: `0/1/2/3` token grids, loading, writing and upscaling
//! - **Model files**: binary `VQTAB` format for trained Q-tables
//! - **SVG export**: grid, potential heatmap, path and endpoints
//!
//! ## Loading Maps
//!
//! ```rust,ignore
//! use vastu_plan::io::{load_map, load_map_dir};
//! use std::path::Path;
//!
//! let map = load_map(Path::new("maps/scenario1.txt"))?;
//! let all = load_map_dir(Path::new("maps"))?;
//! ```
//!
//! ## Saving and Loading Models
//!
//! ```rust,ignore
//! use vastu_plan::io::{save_model, load_model};
//!
//! save_model(&table, Path::new("universal.vqtab"))?;
//! let table = load_model(Path::new("universal.vqtab"))?;
//! ```
//!
//! ## SVG Visualization
//!
//! ```rust,ignore
//! use vastu_plan::io::{SvgConfig, SvgRenderer};
//!
//! SvgRenderer::new(&map.grid, SvgConfig::default())
//!     .with_title("scenario1")
//!     .with_field(&field)
//!     .with_path(&outcome.path)
//!     .with_endpoints(map.start, map.goal)
//!     .save(Path::new("scenario1.svg"))?;
//! ```

pub mod map_text;
pub mod model;
pub mod svg;

pub use map_text::{
    HIGHRES_SUFFIX, format_map, load_map, load_map_dir, parse_map, upscale, upscale_dir, write_map,
};
pub use model::{load_model, read_model, save_model, write_model};
pub use svg::{SvgColorScheme, SvgConfig, SvgRenderer};
