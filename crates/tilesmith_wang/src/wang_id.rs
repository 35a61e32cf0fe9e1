//! Wang IDs: the 8-slot adjacency signature of a tile

use crate::WangSetType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from reading a `wangid` attribute
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WangIdError {
    #[error("expected 8 comma-separated values, found {0}")]
    WrongLength(usize),
    #[error("invalid color index '{0}'")]
    InvalidIndex(String),
}

/// One of the eight slots of a Wang ID, in Tiled's clockwise order:
///   7|0|1
///   6|X|2
///   5|4|3
/// Even slots are edges, odd slots are corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WangPosition {
    Top = 0,
    TopRight = 1,
    Right = 2,
    BottomRight = 3,
    Bottom = 4,
    BottomLeft = 5,
    Left = 6,
    TopLeft = 7,
}

impl WangPosition {
    pub const ALL: [WangPosition; 8] = [
        WangPosition::Top,
        WangPosition::TopRight,
        WangPosition::Right,
        WangPosition::BottomRight,
        WangPosition::Bottom,
        WangPosition::BottomLeft,
        WangPosition::Left,
        WangPosition::TopLeft,
    ];

    pub const EDGES: [WangPosition; 4] = [
        WangPosition::Top,
        WangPosition::Right,
        WangPosition::Bottom,
        WangPosition::Left,
    ];

    pub const CORNERS: [WangPosition; 4] = [
        WangPosition::TopRight,
        WangPosition::BottomRight,
        WangPosition::BottomLeft,
        WangPosition::TopLeft,
    ];

    /// Slot index in the `wangid` attribute
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Check if this slot is a corner (odd index)
    pub fn is_corner(self) -> bool {
        self.index() % 2 == 1
    }

    /// Position on the neighbor that faces this one
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 4) % 8]
    }

    /// Next position clockwise
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 8]
    }

    /// Previous position counter-clockwise
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + 7) % 8]
    }

    pub fn name(self) -> &'static str {
        match self {
            WangPosition::Top => "top",
            WangPosition::TopRight => "top-right",
            WangPosition::Right => "right",
            WangPosition::BottomRight => "bottom-right",
            WangPosition::Bottom => "bottom",
            WangPosition::BottomLeft => "bottom-left",
            WangPosition::Left => "left",
            WangPosition::TopLeft => "top-left",
        }
    }
}

impl fmt::Display for WangPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color index at each of the 8 positions. 0 = no color, colors are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WangId(pub [u8; 8]);

impl WangId {
    pub const EMPTY: Self = WangId([0; 8]);

    /// A Wang ID with every active position of a set type set to one color
    pub fn filled(set_type: WangSetType, color: u8) -> Self {
        let mut id = Self::EMPTY;
        for pos in set_type.active_positions() {
            id.0[pos.index()] = color;
        }
        id
    }

    pub fn color_at(&self, pos: WangPosition) -> u8 {
        self.0[pos.index()]
    }

    pub fn set(&mut self, pos: WangPosition, color: u8) {
        self.0[pos.index()] = color;
    }

    /// Distinct non-zero colors, ascending
    pub fn colors(&self) -> Vec<u8> {
        let mut colors: Vec<u8> = self.0.iter().copied().filter(|c| *c != 0).collect();
        colors.sort_unstable();
        colors.dedup();
        colors
    }

    /// Highest color index referenced (0 if none)
    pub fn max_color(&self) -> u8 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn has_color(&self, color: u8) -> bool {
        color != 0 && self.0.contains(&color)
    }

    /// Check if every position is unset
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| *c == 0)
    }

    /// The single color shared by all active positions of a set type
    pub fn is_uniform(&self, set_type: WangSetType) -> Option<u8> {
        let mut positions = set_type.active_positions().iter();
        let first = self.color_at(*positions.next()?);
        if first == 0 {
            return None;
        }
        positions
            .all(|pos| self.color_at(*pos) == first)
            .then_some(first)
    }

    /// Positions carrying a color that the set type never uses
    pub fn inactive_positions(&self, set_type: WangSetType) -> Vec<WangPosition> {
        WangPosition::ALL
            .into_iter()
            .filter(|pos| self.color_at(*pos) != 0 && !set_type.is_active(*pos))
            .collect()
    }

    /// Check that no color sits on a position the set type ignores
    pub fn uses_only(&self, set_type: WangSetType) -> bool {
        self.inactive_positions(set_type).is_empty()
    }
}

impl FromStr for WangId {
    type Err = WangIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 8 {
            return Err(WangIdError::WrongLength(parts.len()));
        }
        let mut id = WangId::EMPTY;
        for (slot, part) in id.0.iter_mut().zip(parts) {
            *slot = part
                .parse()
                .map_err(|_| WangIdError::InvalidIndex(part.to_string()))?;
        }
        Ok(id)
    }
}

impl fmt::Display for WangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{color}")?;
        }
        Ok(())
    }
}
