//! Report configuration file
//!
//! ```toml
//! title = "Client Dashboard"
//! member_strategy = "assignments"   # or "allocated-hours"
//!
//! [photos]
//! "Jane Doe" = "assets/jane.png"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use statusdeck_engine::MemberStrategy;
use statusdeck_render::PhotoDirectory;
use thiserror::Error;
use tracing::debug;

/// Looked up next to the input file when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "statusdeck.toml";

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

/// Settings shared by every report run
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub title: Option<String>,
    pub member_strategy: Option<MemberStrategy>,
    pub photos: PhotoDirectory,
}

impl Config {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, path)?;
        debug!(path = %path.display(), photos = config.photos.len(), "Loaded config");
        Ok(config)
    }

    /// Load the explicit config, or `statusdeck.toml` beside the input if
    /// one exists. Defaults otherwise.
    pub fn discover(input: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let beside = input
            .parent()
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |dir| dir.join(DEFAULT_CONFIG_FILE));
        if beside.is_file() {
            Self::load(&beside)
        } else {
            Ok(Self::default())
        }
    }
}
