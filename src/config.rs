//! Configuration handling for the TUI

use crate::prediction::DEFAULT_REQUEST_TIMEOUT;
use crate::service::DEFAULT_ADDRESS;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the service address
pub const API_URL_ENV: &str = "AGRI_YIELD_API_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Prediction service base URL
    pub api_url: Option<String>,
    /// Client-side bound on a prediction call, in milliseconds
    pub request_timeout_ms: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "agriyield", "agri-yield-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Service address: environment first, then file, then the default
    pub fn api_url(&self) -> String {
        self.resolve_api_url(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_api_url(&self, from_env: Option<String>) -> String {
        from_env
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_url.is_none());
        assert!(config.request_timeout_ms.is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            api_url: Some("http://10.0.0.5:5000".to_string()),
            request_timeout_ms: Some(2500),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.api_url, Some("http://10.0.0.5:5000".to_string()));
        assert_eq!(parsed.request_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"api_url": "http://localhost:8000", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_url, Some("http://localhost:8000".to_string()));
    }

    #[test]
    fn test_api_url_precedence() {
        let config = TuiConfig {
            api_url: Some("http://from-file:5000".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_api_url(Some("http://from-env:5000".to_string())),
            "http://from-env:5000"
        );
        assert_eq!(config.resolve_api_url(Some("  ".to_string())), "http://from-file:5000");
        assert_eq!(config.resolve_api_url(None), "http://from-file:5000");
        assert_eq!(
            TuiConfig::default().resolve_api_url(None),
            "http://127.0.0.1:5000"
        );
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let config = TuiConfig {
            request_timeout_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_load_returns_ok() {
        // Missing file yields the default config
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
