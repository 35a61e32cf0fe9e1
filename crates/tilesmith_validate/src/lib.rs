//! Consistency checks for Tiled tilesets, Wang sets and maps
//!
//! Every check reports an [`Issue`] instead of stopping at the first
//! problem, so one run lists everything wrong with a file.
//!
//! ```rust,no_run
//! use tilesmith_tiled::load_tileset;
//! use tilesmith_validate::{validate_tileset, ValidateOptions};
//!
//! let doc = load_tileset("assets/tiles/summer.tsx")?;
//! let report = validate_tileset(&doc, &ValidateOptions::default());
//! for issue in report.issues() {
//!     println!("{issue}");
//! }
//! report.into_result(false)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod issue;
mod map;
mod tileset;

pub use issue::{Issue, IssueKind, Severity, ValidationError, ValidationReport};
pub use map::validate_map;
pub use tileset::validate_tileset;

use std::path::PathBuf;

/// Settings for [`validate_tileset`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Open the tileset image and compare its real size with the declared one
    pub check_images: bool,
    /// Extra directories to look for tileset images in
    pub search_paths: Vec<PathBuf>,
}
