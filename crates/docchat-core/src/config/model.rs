//! Configuration data model

use super::logging_config::LoggingConfig;
use super::timeouts;
use crate::error::{ChatError, ChatResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default chunk size sent with every ingest request
pub const DEFAULT_CHUNK_SIZE: u32 = 256;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings
    pub backend: BackendConfig,
    /// Where sessions are persisted
    pub storage: StorageConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the retrieval/chat service
    pub base_url: String,
    /// Chunk size passed to `/ingest`
    pub chunk_size: u32,
    /// Sampling temperature passed to `/chat` (backend default when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            temperature: None,
            connect_timeout_secs: timeouts::CONNECTION_SECS,
            request_timeout_secs: timeouts::REQUEST_SECS,
        }
    }
}

impl BackendConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Session persistence settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the session file (`~/.docchat` when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Partial settings layered over a loaded config (environment, CLI flags)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub chunk_size: Option<u32>,
    pub temperature: Option<f32>,
    pub storage_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl ConfigOverrides {
    /// Check if no override is set
    pub fn is_empty(&self) -> bool {
        self.base_url.is_none()
            && self.chunk_size.is_none()
            && self.temperature.is_none()
            && self.storage_dir.is_none()
            && self.log_level.is_none()
            && self.log_format.is_none()
    }
}

impl Config {
    /// Apply overrides on top of this config
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(base_url) = overrides.base_url {
            self.backend.base_url = base_url;
        }
        if let Some(chunk_size) = overrides.chunk_size {
            self.backend.chunk_size = chunk_size;
        }
        if let Some(temperature) = overrides.temperature {
            self.backend.temperature = Some(temperature);
        }
        if let Some(dir) = overrides.storage_dir {
            self.storage.directory = Some(dir);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ChatResult<()> {
        let base_url = self.backend.base_url.trim();
        if base_url.is_empty() {
            return Err(ChatError::config("Backend base_url must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ChatError::config(format!(
                "Backend base_url must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        if self.backend.chunk_size == 0 {
            return Err(ChatError::config("chunk_size must be greater than zero"));
        }
        if let Some(temperature) = self.backend.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ChatError::config(format!(
                    "temperature must be between 0.0 and 2.0, got {}",
                    temperature
                )));
            }
        }
        if self.backend.request_timeout_secs == 0 || self.backend.connect_timeout_secs == 0 {
            return Err(ChatError::config("Timeouts must be greater than zero"));
        }
        if !self.logging.has_valid_level() {
            return Err(ChatError::config(format!(
                "Unknown log level '{}'. Valid levels are: {:?}",
                self.logging.level,
                LoggingConfig::LEVELS
            )));
        }
        if !self.logging.has_valid_format() {
            return Err(ChatError::config(format!(
                "Unknown log format '{}'. Valid formats are: {:?}",
                self.logging.format,
                LoggingConfig::FORMATS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.chunk_size, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config.apply(ConfigOverrides {
            base_url: Some("https://rag.internal".to_string()),
            chunk_size: Some(512),
            log_level: Some("debug".to_string()),
            ..Default::default()
        });

        assert_eq!(config.backend.base_url, "https://rag.internal");
        assert_eq!(config.backend.chunk_size, 512);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.backend.base_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.backend.chunk_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.backend.temperature = Some(3.5);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_overrides() {
        assert!(ConfigOverrides::default().is_empty());
    }
}
