//! Tileset configuration: an image sheet sliced into a fixed tile grid

use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Per-tile data declared with `<tile id="..">` (class and custom properties)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TileProperties {
    /// Tile class (`class`, or `type` in files older than Tiled 1.9)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Custom user-defined properties
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, Value>,
}

impl TileProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom property
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Get a custom property
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Check if anything is set
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.properties.is_empty()
    }
}

/// The `<image>` element of a tileset
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TilesetImage {
    /// Path to the image file, exactly as written (relative to the tileset file)
    pub source: String,
    /// Declared image width in pixels
    pub width: u32,
    /// Declared image height in pixels
    pub height: u32,
    /// Transparent color key, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trans: Option<String>,
}

impl TilesetImage {
    pub fn new(source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source: source.into(),
            width,
            height,
            trans: None,
        }
    }
}

/// Drawing offset applied to every tile of the tileset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TileOffset {
    pub x: i32,
    pub y: i32,
}

/// Source rectangle of one tile inside the tileset image
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Tileset metadata from a `.tsx` file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Tileset {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: u32,
    /// Number of tile columns in the image (0 for image-collection tilesets)
    pub columns: u32,
    #[serde(default)]
    pub spacing: u32,
    #[serde(default)]
    pub margin: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_offset: Option<TileOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<TilesetImage>,
    /// Custom properties set on the tileset itself
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, Value>,
    /// Per-tile data keyed by local tile id
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tiles: HashMap<u32, TileProperties>,
}

impl Tileset {
    /// Create a single-image tileset with a full grid of tiles
    pub fn new(
        name: impl Into<String>,
        image: TilesetImage,
        tile_width: u32,
        tile_height: u32,
        columns: u32,
        tile_count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            tile_width,
            tile_height,
            tile_count,
            columns,
            image: Some(image),
            ..Default::default()
        }
    }

    /// Number of tile rows, derived from tile count and columns
    pub fn rows(&self) -> u32 {
        if self.columns == 0 {
            0
        } else {
            self.tile_count.div_ceil(self.columns)
        }
    }

    /// Check if a local tile id exists in this tileset
    pub fn contains_tile(&self, tile_id: u32) -> bool {
        tile_id < self.tile_count
    }

    /// Convert a local tile id to (column, row)
    pub fn tile_to_grid(&self, tile_id: u32) -> Option<(u32, u32)> {
        if self.columns == 0 || !self.contains_tile(tile_id) {
            return None;
        }
        Some((tile_id % self.columns, tile_id / self.columns))
    }

    /// Source rectangle of a tile in the image, honouring margin and spacing.
    /// None when the tile is unknown or its position does not fit in `u32`.
    pub fn tile_rect(&self, tile_id: u32) -> Option<TileRect> {
        let (col, row) = self.tile_to_grid(tile_id)?;
        Some(TileRect {
            x: grid_offset(col, self.tile_width, self.margin, self.spacing)?,
            y: grid_offset(row, self.tile_height, self.margin, self.spacing)?,
            width: self.tile_width,
            height: self.tile_height,
        })
    }

    /// How many whole tile columns fit an image of the given width
    pub fn grid_columns_for(&self, image_width: u32) -> u32 {
        fit_count(image_width, self.tile_width, self.margin, self.spacing)
    }

    /// How many whole tile rows fit an image of the given height
    pub fn grid_rows_for(&self, image_height: u32) -> u32 {
        fit_count(image_height, self.tile_height, self.margin, self.spacing)
    }

    /// Get properties for a tile
    pub fn tile_properties(&self, tile_id: u32) -> Option<&TileProperties> {
        self.tiles.get(&tile_id)
    }

    /// Image path joined onto the directory the tileset was read from
    pub fn resolve_image_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.image
            .as_ref()
            .map(|image| base_dir.join(&image.source))
    }

    /// Every location the image may live at, in lookup order: next to the
    /// tileset first, then each search directory.
    pub fn image_candidates(&self, base_dir: &Path, search_paths: &[PathBuf]) -> Vec<PathBuf> {
        let Some(image) = &self.image else {
            return Vec::new();
        };
        let mut candidates = vec![base_dir.join(&image.source)];
        candidates.extend(search_paths.iter().map(|dir| dir.join(&image.source)));
        candidates
    }
}

fn grid_offset(index: u32, tile: u32, margin: u32, spacing: u32) -> Option<u32> {
    let offset = (u64::from(tile) + u64::from(spacing))
        .checked_mul(u64::from(index))?
        .checked_add(u64::from(margin))?;
    u32::try_from(offset).ok()
}

fn fit_count(extent: u32, tile: u32, margin: u32, spacing: u32) -> u32 {
    if tile == 0 {
        return 0;
    }
    extent.saturating_add(spacing).saturating_sub(margin) / tile.saturating_add(spacing)
}
