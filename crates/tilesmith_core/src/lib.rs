//! Core data structures for tilesmith
//!
//! This crate provides the plain data records read from Tiled files:
//! - `Tileset` - An image sheet sliced into a grid of equally sized tiles
//! - `TilesetImage` - The image reference embedded in a tileset
//! - `TileMap` - A map referencing tilesets by first GID, with tile layers
//! - `Layer` - A single CSV tile layer and its role in the map
//! - `Value` - Generic custom property value type
//!
//! Nothing here touches the file system except path resolution helpers;
//! reading files lives in `tilesmith_tiled`.

mod layer;
mod map;
mod tileset;
mod value;

pub use layer::{cell_count, Layer, LayerRole};
pub use map::{strip_flip_flags, TileMap, TilesetRef, TilesetSource, FLIP_FLAGS_MASK};
pub use tileset::{TileOffset, TileProperties, TileRect, Tileset, TilesetImage};
pub use value::Value;
