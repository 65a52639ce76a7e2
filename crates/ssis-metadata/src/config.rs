//! Emitter configuration
//!
//! Loaded from JSON, for example:
//!
//! ```json
//! {"sink": {"type": "file", "path": "out/mcps.json"}, "materializeIolets": false}
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::defaults;
use crate::error::{MetadataError, Result};

/// Where proposals are delivered
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    /// Discard everything
    #[default]
    Null,
    /// One JSON line per proposal on stdout
    Console,
    /// One JSON line per proposal in a file (truncated on open)
    File { path: PathBuf },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitterConfig {
    pub sink: SinkConfig,
    /// Emit a status proposal for every referenced dataset
    pub materialize_iolets: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            sink: SinkConfig::default(),
            materialize_iolets: defaults::MATERIALIZE_IOLETS,
        }
    }
}

impl EmitterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| MetadataError::config(format!("Invalid emitter config: {}", e)))
    }

    /// Load configuration from a JSON file
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No emitter config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Emitter config saved to {:?}", path);
        Ok(())
    }
}
