//! Wang colors (terrain classes) and their display color

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}', expected #rrggbb or #aarrggbb")]
pub struct ColorParseError(pub String);

/// RGBA display color (no rendering dependency)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    /// Tiled writes `#rrggbb`, or `#aarrggbb` when alpha isn't opaque
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.is_ascii() {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Rgba {
                a: byte(0)?,
                r: byte(2)?,
                g: byte(4)?,
                b: byte(6)?,
            }),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }
}

/// A terrain class within a Wang set (e.g., "grass", "dirt", "water")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangColor {
    pub name: String,
    /// Display color for editor visualization
    pub color: Rgba,
    /// Representative tile for this color (`tile="-1"` means none)
    pub tile: Option<u32>,
    /// Relative weight when several tiles match
    pub probability: f32,
}

impl WangColor {
    pub fn new(name: impl Into<String>, color: Rgba) -> Self {
        Self {
            name: name.into(),
            color,
            tile: None,
            probability: 1.0,
        }
    }

    pub fn with_tile(mut self, tile: u32) -> Self {
        self.tile = Some(tile);
        self
    }

    /// Name for messages; unnamed colors print as `#<index>`
    pub fn display_name(&self, index: u8) -> String {
        if self.name.is_empty() {
            format!("#{index}")
        } else {
            self.name.clone()
        }
    }
}
