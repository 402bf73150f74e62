//! Configuration for the style engine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use symbology_common::symbology::DEFAULT_ICON_URI;

use crate::error::{EngineError, Result};

/// Configuration for the style engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of styles cached per feature styler.
    pub style_cache_capacity: usize,

    /// Force a raster source refresh after every data update.
    pub refresh_layers_on_change: bool,

    /// Icon used when an icon symbology does not name one.
    pub default_icon_uri: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            style_cache_capacity: 4096,
            refresh_layers_on_change: false,
            default_icon_uri: DEFAULT_ICON_URI.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("STYLE_CACHE_CAPACITY") {
            if let Ok(capacity) = val.parse() {
                config.style_cache_capacity = capacity;
            }
        }

        if let Ok(val) = std::env::var("REFRESH_LAYERS_ON_CHANGE") {
            config.refresh_layers_on_change = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("DEFAULT_ICON_URI") {
            if !val.is_empty() {
                config.default_icon_uri = val;
            }
        }

        config
    }

    /// Parse a YAML document; missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.style_cache_capacity == 0 {
            return Err(EngineError::config("style_cache_capacity must be > 0"));
        }

        if self.default_icon_uri.trim().is_empty() {
            return Err(EngineError::config("default_icon_uri must not be empty"));
        }

        Ok(())
    }
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}
