//! Tiled-compatible Wang set data model
//!
//! Wang sets describe which tiles fit next to each other: every Wang tile
//! carries an 8-slot [`WangId`] naming the terrain color at each edge and
//! corner. This crate only models and queries that data; it does not pick
//! tiles for a map.
//!
//! # Example
//!
//! ```rust
//! use tilesmith_wang::{Rgba, WangColor, WangId, WangSet, WangSetType};
//!
//! let mut set = WangSet::new("dirt", WangSetType::Corner);
//! let dirt = set.add_color(WangColor::new("dirt", Rgba::RED)).unwrap();
//! let grass = set.add_color(WangColor::new("grass", Rgba::GREEN)).unwrap();
//!
//! set.add_tile(16, WangId::filled(WangSetType::Corner, grass));
//! set.add_tile(17, "0,1,0,1,0,2,0,2".parse().unwrap());
//!
//! assert_eq!(set.uniform_tiles(grass), vec![16]);
//! assert_eq!(set.tiles_with_color(dirt), vec![17]);
//! ```

mod color;
mod set;
mod wang_id;

pub use color::{ColorParseError, Rgba, WangColor};
pub use set::{WangSet, WangSetType, WangSetTypeError, WangTile};
pub use wang_id::{WangId, WangIdError, WangPosition};
