//! `.tsx` tileset reader

use crate::attrs::{parse_tile_ref, parse_value, read_properties, require};
use crate::TiledError;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tilesmith_core::{TileOffset, TileProperties, Tileset, TilesetImage};
use tilesmith_wang::{Rgba, WangColor, WangId, WangSet, WangSetType, WangTile};
use tracing::debug;

/// A tileset together with the Wang sets declared on it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TilesetDocument {
    /// File the tileset was read from (None for embedded or in-memory tilesets)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub tileset: Tileset,
    #[serde(default)]
    pub wang_sets: Vec<WangSet>,
}

impl TilesetDocument {
    /// Directory relative paths inside the tileset resolve against
    pub fn base_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }

    /// Find a Wang set by name
    pub fn wang_set(&self, name: &str) -> Option<&WangSet> {
        self.wang_sets.iter().find(|set| set.name == name)
    }

    /// File path if known, otherwise the tileset name
    pub fn label(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => self.tileset.name.clone(),
        }
    }
}

/// Parse a `.tsx` document from a string
pub fn parse_tileset(xml: &str) -> Result<TilesetDocument, TiledError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if !root.has_tag_name("tileset") {
        return Err(TiledError::MissingElement("tileset"));
    }
    let (tileset, wang_sets) = read_tileset(root)?;
    Ok(TilesetDocument {
        path: None,
        tileset,
        wang_sets,
    })
}

/// Read and parse a `.tsx` file
pub fn load_tileset(path: impl AsRef<Path>) -> Result<TilesetDocument, TiledError> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|e| TiledError::io(path, e))?;
    let mut document = parse_tileset(&xml)?;
    document.path = Some(path.to_path_buf());
    debug!(
        "Loaded tileset '{}' from {}: {} tiles, {} wang sets",
        document.tileset.name,
        path.display(),
        document.tileset.tile_count,
        document.wang_sets.len()
    );
    Ok(document)
}

/// Reads a `<tileset>` element (standalone or embedded in a map)
pub(crate) fn read_tileset(node: Node) -> Result<(Tileset, Vec<WangSet>), TiledError> {
    let mut tileset = Tileset::default();
    let mut tile_width = None;
    let mut tile_height = None;

    // Parses attributes
    for attribute in node.attributes() {
        let name = attribute.name();
        let value = attribute.value();
        match name {
            "name" => tileset.name = value.to_string(),
            "class" => tileset.class = value.to_string(),
            "tilewidth" => tile_width = Some(parse_value("tileset", name, value)?),
            "tileheight" => tile_height = Some(parse_value("tileset", name, value)?),
            "tilecount" => tileset.tile_count = parse_value("tileset", name, value)?,
            "columns" => tileset.columns = parse_value("tileset", name, value)?,
            "spacing" => tileset.spacing = parse_value("tileset", name, value)?,
            "margin" => tileset.margin = parse_value("tileset", name, value)?,
            _ => {}
        }
    }
    tileset.tile_width = require(tile_width, "tileset", "tilewidth")?;
    tileset.tile_height = require(tile_height, "tileset", "tileheight")?;

    // Parses children
    let mut wang_sets = Vec::new();
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "tileoffset" => tileset.tile_offset = Some(read_tile_offset(child)?),
            "image" => tileset.image = Some(read_image(child)?),
            "properties" => tileset.properties = read_properties(child)?,
            "tile" => {
                let (id, properties) = read_tile(child)?;
                if !properties.is_empty() {
                    tileset.tiles.insert(id, properties);
                }
            }
            "wangsets" => {
                for wang_set in child.children().filter(|n| n.has_tag_name("wangset")) {
                    wang_sets.push(read_wang_set(wang_set)?);
                }
            }
            _ => {}
        }
    }

    Ok((tileset, wang_sets))
}

fn read_tile_offset(node: Node) -> Result<TileOffset, TiledError> {
    let mut offset = TileOffset::default();
    for attribute in node.attributes() {
        match attribute.name() {
            "x" => offset.x = parse_value("tileoffset", "x", attribute.value())?,
            "y" => offset.y = parse_value("tileoffset", "y", attribute.value())?,
            _ => {}
        }
    }
    Ok(offset)
}

fn read_image(node: Node) -> Result<TilesetImage, TiledError> {
    let mut image = TilesetImage::default();
    let mut source = None;
    for attribute in node.attributes() {
        let name = attribute.name();
        let value = attribute.value();
        match name {
            "source" => source = Some(value.to_string()),
            "width" => image.width = parse_value("image", name, value)?,
            "height" => image.height = parse_value("image", name, value)?,
            "trans" => image.trans = Some(value.to_string()),
            _ => {}
        }
    }
    image.source = require(source, "image", "source")?;
    Ok(image)
}

fn read_tile(node: Node) -> Result<(u32, TileProperties), TiledError> {
    let id = parse_value("tile", "id", require(node.attribute("id"), "tile", "id")?)?;
    let mut properties = TileProperties {
        class: node
            .attribute("class")
            .or_else(|| node.attribute("type"))
            .map(str::to_string),
        ..Default::default()
    };
    if let Some(props) = node.children().find(|n| n.has_tag_name("properties")) {
        properties.properties = read_properties(props)?;
    }
    Ok((id, properties))
}

fn read_wang_set(node: Node) -> Result<WangSet, TiledError> {
    let mut wang_set = WangSet::default();
    let mut set_type = None;
    for attribute in node.attributes() {
        let name = attribute.name();
        let value = attribute.value();
        match name {
            "name" => wang_set.name = value.to_string(),
            "type" => {
                set_type = Some(value.parse::<WangSetType>().map_err(|_| {
                    TiledError::InvalidAttribute {
                        element: "wangset",
                        attribute: name.to_string(),
                        value: value.to_string(),
                    }
                })?)
            }
            "tile" => wang_set.tile = parse_tile_ref("wangset", name, value)?,
            _ => {}
        }
    }
    wang_set.set_type = require(set_type, "wangset", "type")?;

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "wangcolor" => wang_set.colors.push(read_wang_color(child)?),
            "wangtile" => wang_set.tiles.push(read_wang_tile(child)?),
            _ => {}
        }
    }
    Ok(wang_set)
}

fn read_wang_color(node: Node) -> Result<WangColor, TiledError> {
    let mut color = WangColor::new("", Rgba::default());
    for attribute in node.attributes() {
        let name = attribute.name();
        let value = attribute.value();
        match name {
            "name" => color.name = value.to_string(),
            "color" => color.color = parse_value("wangcolor", name, value)?,
            "tile" => color.tile = parse_tile_ref("wangcolor", name, value)?,
            "probability" => color.probability = parse_value("wangcolor", name, value)?,
            _ => {}
        }
    }
    Ok(color)
}

fn read_wang_tile(node: Node) -> Result<WangTile, TiledError> {
    let tile_id = parse_value(
        "wangtile",
        "tileid",
        require(node.attribute("tileid"), "wangtile", "tileid")?,
    )?;
    let wang_id = require(node.attribute("wangid"), "wangtile", "wangid")?
        .parse::<WangId>()
        .map_err(|source| TiledError::InvalidWangId { tile_id, source })?;
    Ok(WangTile { tile_id, wang_id })
}
