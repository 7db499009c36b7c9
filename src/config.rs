//! Configuration for grok4-cli.
//!
//! The API key comes from the `XAI_API_KEY` environment variable (a `.env`
//! file in the working directory is honored). Endpoint and model defaults can
//! be overridden from `~/.config/grok4/config.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";
pub const DEFAULT_MODEL: &str = "grok-4-0629";

/// Resolved process configuration. Immutable after `load()`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the API.
    pub api_key: String,
    /// Base URL of the API (no trailing slash).
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
}

/// On-disk configuration file. Every field is optional; missing fields fall
/// back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl Config {
    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("grok4").join("config.toml"))
            .context("Could not determine config directory")
    }

    /// Load configuration.
    ///
    /// A missing `XAI_API_KEY` is the only fatal condition; a missing config
    /// file just means defaults.
    pub fn load() -> Result<Self> {
        let api_key = std::env::var("XAI_API_KEY")
            .context("XAI_API_KEY not found in environment variables")?;

        let file = Self::load_file()?;

        let mut base_url = file
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if let Ok(override_url) = std::env::var("XAI_API_BASE") {
            base_url = override_url;
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        let model = file.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }

    fn load_file() -> Result<FileConfig> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(FileConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_empty() {
        let file: FileConfig = toml::from_str("").unwrap();
        assert!(file.base_url.is_none());
        assert!(file.model.is_none());
    }

    #[test]
    fn test_file_config_overrides() {
        let file: FileConfig = toml::from_str(
            r#"
base_url = "http://localhost:8080/v1"
model = "grok-4-mini"
"#,
        )
        .unwrap();
        assert_eq!(file.base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(file.model.as_deref(), Some("grok-4-mini"));
    }

    #[test]
    fn test_file_config_ignores_unknown_keys() {
        let file: FileConfig = toml::from_str("temperature = 0.5").unwrap();
        assert!(file.model.is_none());
    }
}
