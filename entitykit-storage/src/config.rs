//! Storage configuration, read from a TOML file.
//!
//! ```toml
//! validate_on_save = true
//! first_id = 1
//! default_bundle = "default"
//! ```

use crate::error::StorageResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Run the field validation layer before every save.
    #[serde(default = "default_validate_on_save")]
    pub validate_on_save: bool,
    /// Id given to the first record saved.
    #[serde(default = "default_first_id")]
    pub first_id: u64,
    /// Bundle used by `create` when the values name none.
    #[serde(default = "default_bundle")]
    pub default_bundle: String,
}

fn default_validate_on_save() -> bool {
    true
}

fn default_first_id() -> u64 {
    1
}

fn default_bundle() -> String {
    "default".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            validate_on_save: default_validate_on_save(),
            first_id: default_first_id(),
            default_bundle: default_bundle(),
        }
    }
}

impl StorageConfig {
    /// Parses a configuration document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> StorageResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads configuration from `path`.
    /// Falls back to defaults, with a warning, if the file cannot be read or
    /// parsed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No storage config found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded storage config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse storage config {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read storage config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
