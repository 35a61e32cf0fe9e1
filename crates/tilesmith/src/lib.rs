//! # tilesmith
//!
//! Read, query and validate Tiled tilesets (`.tsx`) and their Wang sets.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tilesmith::prelude::*;
//!
//! let doc = load_tileset("assets/tiles/summer.tsx")?;
//! let dirt = doc.wang_set("dirt").expect("summer.tsx has a dirt set");
//! let grass = dirt.color_index("grass").unwrap_or(0);
//! println!("{} full grass tiles", dirt.uniform_tiles(grass).len());
//!
//! let report = validate_tileset(&doc, &ValidateOptions::default());
//! assert!(report.is_ok());
//! # Ok::<(), tilesmith::tiled::TiledError>(())
//! ```
//!
//! ## Features
//!
//! - `validate` (default) - Consistency checks for tilesets and maps
//!
//! ## Crate Structure
//!
//! This umbrella crate re-exports all tilesmith_* sub-crates:
//!
//! - [`core`] - Tileset grid and tile map types
//! - [`wang`] - Wang set data model
//! - [`tiled`] - `.tsx` / `.tmx` reader
//! - [`validate`] - Checks (requires `validate` feature)

// =============================================================================
// Core module - tileset and map data
// =============================================================================

/// Tileset grid geometry and tile map queries.
///
/// - [`Tileset`] - Image sheet sliced into tiles
/// - [`TileMap`] - Layers of GIDs over referenced tilesets
/// - [`Value`] - Typed custom property value
pub mod core {
    pub use tilesmith_core::*;
}

pub use tilesmith_core::{
    strip_flip_flags, Layer, LayerRole, TileMap, TileOffset, TileProperties, TileRect, Tileset,
    TilesetImage, TilesetRef, TilesetSource, Value, FLIP_FLAGS_MASK,
};

// =============================================================================
// Wang module - terrain adjacency data
// =============================================================================

/// Wang sets, colors and 8-slot Wang IDs.
pub mod wang {
    pub use tilesmith_wang::*;
}

pub use tilesmith_wang::{
    Rgba, WangColor, WangId, WangPosition, WangSet, WangSetType, WangSetTypeError, WangTile,
};

// =============================================================================
// Tiled module - file reader
// =============================================================================

/// Reader for Tiled `.tsx` and `.tmx` files.
pub mod tiled {
    pub use tilesmith_tiled::*;
}

pub use tilesmith_tiled::{
    load_map, load_map_with_tilesets, load_tileset, parse_map, parse_tileset, LoadedMap,
    TiledError, TilesetDocument,
};

// =============================================================================
// Validate module - consistency checks (optional)
// =============================================================================

/// Tileset, Wang set and map checks.
#[cfg(feature = "validate")]
pub mod validate {
    pub use tilesmith_validate::*;
}

#[cfg(feature = "validate")]
pub use tilesmith_validate::{
    validate_map, validate_tileset, Issue, IssueKind, Severity, ValidateOptions,
    ValidationError, ValidationReport,
};

// =============================================================================
// Prelude - common imports
// =============================================================================

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use crate::{
        load_map, load_map_with_tilesets, load_tileset, LayerRole, TileMap, TiledError, Tileset,
        TilesetDocument, WangColor, WangId, WangPosition, WangSet, WangSetType,
    };

    #[cfg(feature = "validate")]
    pub use crate::{validate_map, validate_tileset, ValidateOptions, ValidationReport};
}
