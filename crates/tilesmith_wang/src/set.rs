//! Wang sets: named adjacency-rule tables over a tileset

use crate::{WangColor, WangId, WangPosition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Type of Wang set - determines which positions of a Wang ID are matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WangSetType {
    /// 4 corners per tile. Good for basic terrain transitions.
    #[default]
    Corner,
    /// 4 edges per tile. Good for roads, fences, paths.
    Edge,
    /// 4 corners + 4 edges per tile
    Mixed,
}

impl WangSetType {
    /// Positions this set type assigns colors to
    pub fn active_positions(&self) -> &'static [WangPosition] {
        match self {
            WangSetType::Corner => &WangPosition::CORNERS,
            WangSetType::Edge => &WangPosition::EDGES,
            WangSetType::Mixed => &WangPosition::ALL,
        }
    }

    pub fn is_active(&self, pos: WangPosition) -> bool {
        match self {
            WangSetType::Corner => pos.is_corner(),
            WangSetType::Edge => !pos.is_corner(),
            WangSetType::Mixed => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WangSetType::Corner => "corner",
            WangSetType::Edge => "edge",
            WangSetType::Mixed => "mixed",
        }
    }
}

/// Unrecognized `type` attribute on a `<wangset>`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown wang set type '{0}'")]
pub struct WangSetTypeError(pub String);

impl FromStr for WangSetType {
    type Err = WangSetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corner" => Ok(WangSetType::Corner),
            "edge" => Ok(WangSetType::Edge),
            "mixed" => Ok(WangSetType::Mixed),
            _ => Err(WangSetTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for WangSetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tile's adjacency signature within a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WangTile {
    /// Local tile id in the owning tileset
    pub tile_id: u32,
    pub wang_id: WangId,
}

/// A Wang set as declared in a tileset's `<wangsets>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WangSet {
    pub name: String,
    pub set_type: WangSetType,
    /// Representative tile for the set (`tile="-1"` means none)
    pub tile: Option<u32>,
    /// Declared colors; Wang IDs reference them 1-based
    pub colors: Vec<WangColor>,
    /// Wang tiles in declaration order
    pub tiles: Vec<WangTile>,
}

impl WangSet {
    pub fn new(name: impl Into<String>, set_type: WangSetType) -> Self {
        Self {
            name: name.into(),
            set_type,
            ..Default::default()
        }
    }

    /// Add a color, returning its 1-based index. Colors past the 255th are
    /// kept but have no index a Wang ID can refer to.
    pub fn add_color(&mut self, color: WangColor) -> Option<u8> {
        self.colors.push(color);
        u8::try_from(self.colors.len()).ok()
    }

    /// Add a Wang tile
    pub fn add_tile(&mut self, tile_id: u32, wang_id: WangId) {
        self.tiles.push(WangTile { tile_id, wang_id });
    }

    /// Look up a color by its 1-based index
    pub fn color(&self, index: u8) -> Option<&WangColor> {
        let slot = usize::from(index).checked_sub(1)?;
        self.colors.get(slot)
    }

    /// 1-based index of the first color with this name
    pub fn color_index(&self, name: &str) -> Option<u8> {
        self.colors
            .iter()
            .position(|c| c.name == name)
            .and_then(|i| u8::try_from(i + 1).ok())
    }

    /// Number of declared colors
    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    /// Wang ID of a tile (the first declaration wins if duplicated)
    pub fn wang_id_of(&self, tile_id: u32) -> Option<WangId> {
        self.tiles
            .iter()
            .find(|t| t.tile_id == tile_id)
            .map(|t| t.wang_id)
    }

    /// Tiles using a color at any position
    pub fn tiles_with_color(&self, color: u8) -> Vec<u32> {
        self.tiles
            .iter()
            .filter(|t| t.wang_id.has_color(color))
            .map(|t| t.tile_id)
            .collect()
    }

    /// Tiles whose active positions all carry one color ("fill" tiles)
    pub fn uniform_tiles(&self, color: u8) -> Vec<u32> {
        self.tiles
            .iter()
            .filter(|t| t.wang_id.is_uniform(self.set_type) == Some(color))
            .map(|t| t.tile_id)
            .collect()
    }

    /// Color indices referenced by at least one Wang tile
    pub fn used_colors(&self) -> BTreeSet<u8> {
        self.tiles
            .iter()
            .flat_map(|t| t.wang_id.colors())
            .collect()
    }

    /// Declared color indices no Wang tile references
    pub fn unused_colors(&self) -> Vec<u8> {
        let used = self.used_colors();
        let last = u8::try_from(self.colors.len()).unwrap_or(u8::MAX);
        (1..=last)
            .filter(|index| !used.contains(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;

    fn dirt_set() -> WangSet {
        let mut set = WangSet::new("dirt", WangSetType::Corner);
        set.add_color(WangColor::new("dirt", Rgba::RED).with_tile(52));
        set.add_color(WangColor::new("grass", Rgba::GREEN).with_tile(16));
        set.add_color(WangColor::new("water", Rgba::BLUE).with_tile(220));
        set.add_tile(1, "0,2,0,1,0,2,0,2".parse().unwrap());
        set.add_tile(4, "0,1,0,1,0,1,0,1".parse().unwrap());
        set.add_tile(16, "0,2,0,2,0,2,0,2".parse().unwrap());
        set.add_tile(32, "0,2,0,2,0,2,0,2".parse().unwrap());
        set
    }

    #[test]
    fn test_set_type_positions() {
        assert_eq!(WangSetType::Corner.active_positions().len(), 4);
        assert_eq!(WangSetType::Edge.active_positions().len(), 4);
        assert_eq!(WangSetType::Mixed.active_positions().len(), 8);
        assert!(WangSetType::Edge.is_active(WangPosition::Left));
        assert!(!WangSetType::Edge.is_active(WangPosition::TopLeft));
        assert_eq!("edge".parse::<WangSetType>(), Ok(WangSetType::Edge));
        assert_eq!(
            "blob".parse::<WangSetType>(),
            Err(WangSetTypeError("blob".to_string()))
        );
        assert_eq!(
            WangSetTypeError("blob".to_string()).to_string(),
            "unknown wang set type 'blob'"
        );
    }

    #[test]
    fn test_color_lookup() {
        let set = dirt_set();
        assert!(set.color(0).is_none());
        assert_eq!(set.color(2).map(|c| c.name.as_str()), Some("grass"));
        assert!(set.color(4).is_none());
        assert_eq!(set.color_index("water"), Some(3));
        assert_eq!(set.color_index("lava"), None);
        assert_eq!(set.color_count(), 3);
    }

    #[test]
    fn test_tile_queries() {
        let set = dirt_set();
        assert_eq!(
            set.wang_id_of(1).map(|id| id.to_string()),
            Some("0,2,0,1,0,2,0,2".to_string())
        );
        assert_eq!(set.wang_id_of(2), None);
        assert_eq!(set.tiles_with_color(1), vec![1, 4]);
        assert_eq!(set.uniform_tiles(2), vec![16, 32]);
        assert_eq!(set.uniform_tiles(3), Vec::<u32>::new());
    }

    #[test]
    fn test_used_colors() {
        let set = dirt_set();
        assert_eq!(set.used_colors().into_iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(set.unused_colors(), vec![3]);
    }

    #[test]
    fn test_more_colors_than_indices() {
        let mut set = WangSet::new("big", WangSetType::Corner);
        for i in 0..254 {
            set.add_color(WangColor::new(format!("c{i}"), Rgba::RED));
        }
        assert_eq!(set.add_color(WangColor::new("last", Rgba::RED)), Some(255));
        assert_eq!(set.add_color(WangColor::new("extra", Rgba::RED)), None);
        assert_eq!(set.color_count(), 256);
        assert_eq!(set.color_index("last"), Some(255));
        assert_eq!(set.color_index("extra"), None);

        let unused = set.unused_colors();
        assert_eq!(unused.len(), 255);
        assert_eq!(unused.last(), Some(&255));
    }
}
