//! Reader for Tiled tilesets (`.tsx`) and maps (`.tmx`)
//!
//! Only the parts of the formats the rest of the toolkit uses are read:
//! tileset grids, per-tile properties, Wang sets, and finite orthogonal
//! maps with CSV layer data. Unknown elements and attributes are ignored so
//! files written by newer Tiled versions still load.

mod attrs;
mod error;
mod map;
mod tileset;

pub use error::TiledError;
pub use map::{load_map, load_map_with_tilesets, parse_map, LoadedMap};
pub use tileset::{load_tileset, parse_tileset, TilesetDocument};
