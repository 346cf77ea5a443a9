//! CLI configuration file support.
//!
//! An optional `config.toml` under the user config directory sets defaults
//! the flags would otherwise repeat:
//!
//! ```toml
//! format = "json"
//! color = false
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{SketchError, SketchResult};

/// User-level CLI defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Default output format ("table" or "json").
    #[serde(default)]
    pub format: Option<String>,
    /// Whether to colorize terminal output.
    #[serde(default)]
    pub color: Option<bool>,
}

impl Config {
    /// Location of the config file, if the platform has a config dir.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sqlsketch").join("config.toml"))
    }

    /// Load the user config. A missing file yields the defaults; a present
    /// but unparsable file is an error worth surfacing.
    pub fn load() -> SketchResult<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| SketchError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str("format = \"json\"\ncolor = false\n").unwrap();
        assert_eq!(config.format.as_deref(), Some("json"));
        assert_eq!(config.color, Some(false));
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.format.is_none());
        assert!(config.color.is_none());
    }
}
