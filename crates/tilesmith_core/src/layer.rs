//! Tile layers of a map

use serde::{Deserialize, Serialize};

/// What a layer is used for, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerRole {
    Ground,
    Decoration,
    /// Any non-zero GID marks the cell as solid
    Collision,
    /// GIDs tag cells with a zone id
    Zone,
    Other,
}

impl LayerRole {
    /// Role for a layer name (case-insensitive)
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "ground" => LayerRole::Ground,
            "decoration" => LayerRole::Decoration,
            "collision" => LayerRole::Collision,
            "zone" => LayerRole::Zone,
            _ => LayerRole::Other,
        }
    }
}

/// A finite tile layer stored row-major
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub role: LayerRole,
    /// Global tile ids, `width * height` entries, 0 = empty
    pub gids: Vec<u32>,
}

impl Layer {
    /// Create a layer, padding or truncating `gids` to `width * height`
    pub fn new(name: impl Into<String>, width: u32, height: u32, mut gids: Vec<u32>) -> Self {
        let name = name.into();
        gids.resize(cell_count(width, height), 0);
        Self {
            role: LayerRole::from_name(&name),
            name,
            visible: true,
            gids,
        }
    }

    /// GID at a cell, if inside a layer of the given width
    pub fn gid_at(&self, x: u32, y: u32, width: u32) -> Option<u32> {
        if x >= width {
            return None;
        }
        let index = u64::from(y) * u64::from(width) + u64::from(x);
        let index = usize::try_from(index).ok()?;
        self.gids.get(index).copied()
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.gids.iter().filter(|gid| **gid != 0).count()
    }
}

/// Number of cells in a `width * height` grid
pub fn cell_count(width: u32, height: u32) -> usize {
    (width as usize).saturating_mul(height as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_name() {
        assert_eq!(LayerRole::from_name("Collision"), LayerRole::Collision);
        assert_eq!(LayerRole::from_name("ZONE"), LayerRole::Zone);
        assert_eq!(LayerRole::from_name("ground"), LayerRole::Ground);
        assert_eq!(LayerRole::from_name("Trees"), LayerRole::Other);
    }

    #[test]
    fn test_new_layer_resizes() {
        let short = Layer::new("Ground", 2, 2, vec![1, 2, 3]);
        assert_eq!(short.gids, vec![1, 2, 3, 0]);

        let long = Layer::new("Ground", 2, 1, vec![1, 2, 3]);
        assert_eq!(long.gids, vec![1, 2]);
        assert!(long.visible);
    }

    #[test]
    fn test_gid_at() {
        let layer = Layer::new("decoration", 3, 2, vec![0, 5, 0, 0, 0, 7]);
        assert_eq!(layer.gid_at(1, 0, 3), Some(5));
        assert_eq!(layer.gid_at(2, 1, 3), Some(7));
        assert_eq!(layer.gid_at(3, 0, 3), None);
        assert_eq!(layer.gid_at(0, 2, 3), None);
        assert_eq!(layer.filled_count(), 2);

        // Far outside a small layer, even when the index exceeds u32
        assert_eq!(layer.gid_at(0, u32::MAX, u32::MAX), None);
    }
}
