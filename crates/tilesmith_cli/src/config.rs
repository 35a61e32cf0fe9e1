//! `tilesmith.toml` settings
//!
//! Looked up in this order, first hit wins:
//! - the file given with `--config`
//! - `tilesmith.toml` in the working directory
//! - the platform config directory:
//!   - Windows: %APPDATA%/tilesmith/config/
//!   - Linux: ~/.config/tilesmith/
//!   - macOS: ~/Library/Application Support/tilesmith/

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tilesmith_validate::ValidateOptions;
use tracing::debug;

pub const CONFIG_FILE: &str = "tilesmith.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// The `[validate]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Treat warnings as failures
    pub deny_warnings: bool,
    /// Open tileset images and compare their size
    pub check_images: bool,
    /// Extra image directories, relative to the config file
    pub search_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub validate: ValidateConfig,
}

impl Config {
    /// Platform config directory for tilesmith
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tilesmith").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Parse the text of the config file at `path`. Relative search paths are
    /// joined onto the directory of that file.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or(Path::new(""));
        for search_path in &mut config.validate.search_paths {
            if search_path.is_relative() {
                *search_path = base_dir.join(&*search_path);
            }
        }
        Ok(config)
    }

    /// Read a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Find and read the config, falling back to defaults when no file exists.
    /// An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let candidates = std::iter::once(PathBuf::from(CONFIG_FILE))
            .chain(Self::config_dir().map(|dir| dir.join(CONFIG_FILE)));
        for path in candidates {
            if path.is_file() {
                debug!("Using config {}", path.display());
                return Self::load_from(&path);
            }
        }
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            check_images: self.validate.check_images,
            search_paths: self.validate.search_paths.clone(),
        }
    }
}
