//! Tile map: tileset references, layers and cell queries

use crate::{Layer, LayerRole, Tileset};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// High bits Tiled stores in a GID for flipping/rotation
pub const FLIP_FLAGS_MASK: u32 = 0xF000_0000;

/// Remove the flip/rotation bits from a GID
pub fn strip_flip_flags(gid: u32) -> u32 {
    gid & !FLIP_FLAGS_MASK
}

/// Where a map's tileset lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TilesetSource {
    /// `.tsx` path, already joined onto the map's directory
    External(PathBuf),
    /// Tileset written inline in the map
    Embedded(Box<Tileset>),
}

/// A `<tileset>` entry of a map
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TilesetRef {
    pub first_gid: u32,
    pub source: TilesetSource,
}

impl TilesetRef {
    pub fn external(first_gid: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            first_gid,
            source: TilesetSource::External(path.into()),
        }
    }

    pub fn embedded(first_gid: u32, tileset: Tileset) -> Self {
        Self {
            first_gid,
            source: TilesetSource::Embedded(Box::new(tileset)),
        }
    }

    /// The inline tileset, if this entry is embedded
    pub fn embedded_tileset(&self) -> Option<&Tileset> {
        match &self.source {
            TilesetSource::Embedded(tileset) => Some(tileset),
            TilesetSource::External(_) => None,
        }
    }
}

/// A finite orthogonal tile map
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TileMap {
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tilesets: Vec<TilesetRef>,
    pub layers: Vec<Layer>,
}

impl TileMap {
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            width,
            height,
            tile_width,
            tile_height,
            ..Default::default()
        }
    }

    /// Map size in pixels
    pub fn pixel_size(&self) -> (u64, u64) {
        (
            u64::from(self.width) * u64::from(self.tile_width),
            u64::from(self.height) * u64::from(self.tile_height),
        )
    }

    /// Check if a tile coordinate is inside the map
    pub fn in_bounds(&self, tile_x: i32, tile_y: i32) -> bool {
        tile_x >= 0 && tile_y >= 0 && (tile_x as u32) < self.width && (tile_y as u32) < self.height
    }

    /// Resolve a GID to (tileset index, local tile id).
    ///
    /// Picks the tileset with the greatest `first_gid` not above the GID.
    /// Returns None for the empty GID 0 or when no tileset starts low enough.
    pub fn resolve_gid(&self, gid: u32) -> Option<(usize, u32)> {
        let gid = strip_flip_flags(gid);
        if gid == 0 {
            return None;
        }
        self.tilesets
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.first_gid <= gid)
            .max_by_key(|(_, entry)| entry.first_gid)
            .map(|(index, entry)| (index, gid - entry.first_gid))
    }

    /// The layer serving a role. Later layers replace earlier ones; layers
    /// with unrecognised names count as ground.
    pub fn layer(&self, role: LayerRole) -> Option<&Layer> {
        self.layers.iter().rev().find(|layer| match role {
            LayerRole::Ground => matches!(layer.role, LayerRole::Ground | LayerRole::Other),
            _ => layer.role == role,
        })
    }

    fn cell(&self, role: LayerRole, tile_x: i32, tile_y: i32) -> Option<u32> {
        if !self.in_bounds(tile_x, tile_y) {
            return None;
        }
        self.layer(role)?
            .gid_at(tile_x as u32, tile_y as u32, self.width)
    }

    /// Whether a tile blocks movement. Everything outside the map is solid.
    pub fn is_solid(&self, tile_x: i32, tile_y: i32) -> bool {
        if !self.in_bounds(tile_x, tile_y) {
            return true;
        }
        self.cell(LayerRole::Collision, tile_x, tile_y)
            .is_some_and(|gid| strip_flip_flags(gid) > 0)
    }

    /// Whether the tile under a pixel position blocks movement
    pub fn is_solid_at_pixel(&self, px: f64, py: f64) -> bool {
        if self.tile_width == 0 || self.tile_height == 0 {
            return true;
        }
        let tile_x = (px / self.tile_width as f64).floor() as i32;
        let tile_y = (py / self.tile_height as f64).floor() as i32;
        self.is_solid(tile_x, tile_y)
    }

    /// Collision value at a tile: 1 if solid (or outside the map), else 0
    pub fn collision_at(&self, tile_x: i32, tile_y: i32) -> u32 {
        u32::from(self.is_solid(tile_x, tile_y))
    }

    /// Zone id at a tile, if the zone layer tags it
    pub fn zone_at(&self, tile_x: i32, tile_y: i32) -> Option<u32> {
        self.cell(LayerRole::Zone, tile_x, tile_y)
            .map(strip_flip_flags)
            .filter(|gid| *gid > 0)
    }
}
