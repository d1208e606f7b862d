//! TOML configuration file support.
//!
//! Column settings for `rewrite` can be kept in a config file instead of
//! being passed as flags every time:
//!
//! ```toml
//! # angmap.toml
//! [write]
//! image_quality = "iq"
//! confidence_index = "ci"
//! sem_signal = "detector_signal"
//! pattern_fit = "fit"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use angmap::ang::WriteOptions;

/// Root configuration structure for angmap.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Write-specific settings.
    #[serde(default)]
    pub write: WriteOptions,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [write]
            image_quality = "iq"
            confidence_index = "ci"
            sem_signal = "detector_signal"
            pattern_fit = "fit"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.write.image_quality.as_deref(), Some("iq"));
        assert_eq!(config.write.confidence_index.as_deref(), Some("ci"));
        assert_eq!(config.write.sem_signal.as_deref(), Some("detector_signal"));
        assert_eq!(config.write.pattern_fit.as_deref(), Some("fit"));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [write]
            confidence_index = "reliability"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.write.confidence_index.as_deref(), Some("reliability"));
        assert_eq!(config.write.image_quality, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.write, WriteOptions::default());
    }
}
