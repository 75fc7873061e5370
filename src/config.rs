//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the backend base URL and the last used email.
//!
//! Configuration is stored at `~/.config/spindeck/config.json`; the
//! backend URL can be overridden with the `SPINDECK_API_URL` environment
//! variable.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config directory paths
const APP_NAME: &str = "spindeck";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default backend base URL for local development
const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the durable token key.
    pub fn token_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME))
    }

    /// Resolve the backend base URL: environment wins, then config, then
    /// the local default. A trailing slash is stripped so endpoint paths
    /// can always start with one.
    pub fn resolved_api_url(&self) -> String {
        let url = std::env::var("SPINDECK_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        url.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_api_url_default() {
        let config = Config::default();
        if std::env::var("SPINDECK_API_URL").is_err() {
            assert_eq!(config.resolved_api_url(), DEFAULT_API_URL);
        }
    }

    #[test]
    fn test_resolved_api_url_strips_trailing_slash() {
        let config = Config {
            api_url: Some("https://spin.example.com/".to_string()),
            last_email: None,
        };
        if std::env::var("SPINDECK_API_URL").is_err() {
            assert_eq!(config.resolved_api_url(), "https://spin.example.com");
        }
    }
}
