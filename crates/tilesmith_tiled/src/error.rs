use std::path::PathBuf;
use thiserror::Error;
use tilesmith_wang::WangIdError;

/// Errors from reading Tiled files
#[derive(Debug, Error)]
pub enum TiledError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Missing <{0}> element")]
    MissingElement(&'static str),

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("<{element}> has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        element: &'static str,
        attribute: String,
        value: String,
    },

    #[error("Wang tile {tile_id} has invalid wangid: {source}")]
    InvalidWangId {
        tile_id: u32,
        #[source]
        source: WangIdError,
    },

    #[error("Layer '{layer}' uses unsupported data encoding '{encoding}'")]
    UnsupportedEncoding { layer: String, encoding: String },

    #[error("Layer '{layer}' has invalid tile data '{value}'")]
    InvalidLayerData { layer: String, value: String },

    #[error("Unsupported map: {0}")]
    UnsupportedMap(String),
}

impl TiledError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TiledError::Io {
            path: path.into(),
            source,
        }
    }
}
