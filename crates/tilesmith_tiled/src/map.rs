//! `.tmx` map reader (finite orthogonal maps with CSV layer data)

use crate::attrs::{parse_value, require};
use crate::tileset::{load_tileset, read_tileset, TilesetDocument};
use crate::TiledError;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tilesmith_core::{Layer, TileMap, TilesetRef, TilesetSource};
use tilesmith_wang::WangSet;
use tracing::debug;

/// A map together with every tileset it references
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedMap {
    pub map: TileMap,
    /// One document per `map.tilesets` entry, in the same order
    pub tilesets: Vec<TilesetDocument>,
}

impl LoadedMap {
    /// Tileset document and local tile id for a GID
    pub fn tileset_for_gid(&self, gid: u32) -> Option<(&TilesetDocument, u32)> {
        let (index, local) = self.map.resolve_gid(gid)?;
        self.tilesets.get(index).map(|doc| (doc, local))
    }
}

/// Parse a `.tmx` document. External tileset paths are joined onto `base_dir`.
pub fn parse_map(xml: &str, base_dir: &Path) -> Result<TileMap, TiledError> {
    read_map(xml, base_dir).map(|(map, _)| map)
}

/// Read and parse a `.tmx` file
pub fn load_map(path: impl AsRef<Path>) -> Result<TileMap, TiledError> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|e| TiledError::io(path, e))?;
    let map = parse_map(&xml, path.parent().unwrap_or(Path::new("")))?;
    debug!(
        "Loaded map {}: {}x{} tiles, {} tilesets, {} layers",
        path.display(),
        map.width,
        map.height,
        map.tilesets.len(),
        map.layers.len()
    );
    Ok(map)
}

/// Read a `.tmx` file and every external tileset it references
pub fn load_map_with_tilesets(path: impl AsRef<Path>) -> Result<LoadedMap, TiledError> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|e| TiledError::io(path, e))?;
    let (map, mut embedded_wang_sets) = read_map(&xml, path.parent().unwrap_or(Path::new("")))?;

    let mut tilesets = Vec::with_capacity(map.tilesets.len());
    for (entry, wang_sets) in map.tilesets.iter().zip(embedded_wang_sets.iter_mut()) {
        let document = match &entry.source {
            TilesetSource::External(tsx) => load_tileset(tsx)?,
            TilesetSource::Embedded(tileset) => TilesetDocument {
                path: None,
                tileset: (**tileset).clone(),
                wang_sets: std::mem::take(wang_sets),
            },
        };
        tilesets.push(document);
    }

    debug!(
        "Loaded map {} with {} tilesets",
        path.display(),
        tilesets.len()
    );
    Ok(LoadedMap { map, tilesets })
}

/// Parses the map and keeps the Wang sets of embedded tilesets, indexed like
/// `map.tilesets` (empty for external entries)
fn read_map(xml: &str, base_dir: &Path) -> Result<(TileMap, Vec<Vec<WangSet>>), TiledError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if !root.has_tag_name("map") {
        return Err(TiledError::MissingElement("map"));
    }

    let mut width = None;
    let mut height = None;
    let mut tile_width = None;
    let mut tile_height = None;

    // Parses attributes
    for attribute in root.attributes() {
        let name = attribute.name();
        let value = attribute.value();
        match name {
            "width" => width = Some(parse_value("map", name, value)?),
            "height" => height = Some(parse_value("map", name, value)?),
            "tilewidth" => tile_width = Some(parse_value("map", name, value)?),
            "tileheight" => tile_height = Some(parse_value("map", name, value)?),
            "infinite" if value.trim() == "1" => {
                return Err(TiledError::UnsupportedMap(
                    "infinite maps are not supported".to_string(),
                ))
            }
            "orientation" if value != "orthogonal" => {
                return Err(TiledError::UnsupportedMap(format!(
                    "{value} orientation is not supported"
                )))
            }
            _ => {}
        }
    }
    let width: u32 = require(width, "map", "width")?;
    let height: u32 = require(height, "map", "height")?;
    if width.checked_mul(height).is_none() {
        return Err(TiledError::UnsupportedMap(format!(
            "{width}x{height} tiles is too large"
        )));
    }
    let mut map = TileMap::new(
        width,
        height,
        require(tile_width, "map", "tilewidth")?,
        require(tile_height, "map", "tileheight")?,
    );

    // Parses children
    let mut embedded_wang_sets = Vec::new();
    for child in root.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "tileset" => {
                let first_gid = parse_value(
                    "tileset",
                    "firstgid",
                    require(child.attribute("firstgid"), "tileset", "firstgid")?,
                )?;
                match child.attribute("source") {
                    Some(source) => {
                        map.tilesets
                            .push(TilesetRef::external(first_gid, base_dir.join(source)));
                        embedded_wang_sets.push(Vec::new());
                    }
                    None => {
                        let (tileset, wang_sets) = read_tileset(child)?;
                        map.tilesets.push(TilesetRef::embedded(first_gid, tileset));
                        embedded_wang_sets.push(wang_sets);
                    }
                }
            }
            "layer" | "group" => read_layers(child, &mut map, true)?,
            _ => {}
        }
    }

    Ok((map, embedded_wang_sets))
}

/// Appends a tile layer, or every tile layer nested in a group. A hidden
/// group hides everything inside it.
fn read_layers(node: Node, map: &mut TileMap, parent_visible: bool) -> Result<(), TiledError> {
    let visible = parent_visible && node.attribute("visible").map_or(true, |v| v.trim() != "0");
    if node.has_tag_name("group") {
        for child in node.children().filter(Node::is_element) {
            if child.has_tag_name("layer") || child.has_tag_name("group") {
                read_layers(child, map, visible)?;
            }
        }
        return Ok(());
    }

    let name = node.attribute("name").unwrap_or_default();
    let data = node
        .children()
        .find(|n| n.has_tag_name("data"))
        .ok_or(TiledError::MissingElement("data"))?;
    let gids = read_layer_data(name, data)?;
    let mut layer = Layer::new(name, map.width, map.height, gids);
    layer.visible = visible;
    map.layers.push(layer);
    Ok(())
}

fn read_layer_data(layer: &str, data: Node) -> Result<Vec<u32>, TiledError> {
    if let Some(compression) = data.attribute("compression") {
        return Err(TiledError::UnsupportedEncoding {
            layer: layer.to_string(),
            encoding: compression.to_string(),
        });
    }
    match data.attribute("encoding") {
        None | Some("csv") => {}
        Some(other) => {
            return Err(TiledError::UnsupportedEncoding {
                layer: layer.to_string(),
                encoding: other.to_string(),
            })
        }
    }

    data.text()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value.parse::<u32>().map_err(|_| TiledError::InvalidLayerData {
                layer: layer.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}
