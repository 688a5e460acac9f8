//! Configuration management
//!
//! Settings are layered: defaults, then a config file, then `DOCCHAT_*`
//! environment variables, then command line flags. The result is validated
//! once, after all layers are applied.

pub mod env_loader;
pub mod file_loader;
pub mod logging_config;
pub mod model;
pub mod timeouts;

pub use logging_config::LoggingConfig;
pub use model::{
    BackendConfig, Config, ConfigOverrides, DEFAULT_BASE_URL, DEFAULT_CHUNK_SIZE, StorageConfig,
};

use crate::error::ChatResult;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "docchat.toml";

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Configuration from a file
    File(PathBuf),
    /// Configuration from `DOCCHAT_*` environment variables
    Environment,
    /// Explicit overrides, typically command line flags
    Overrides(ConfigOverrides),
}

/// Configuration loader with support for multiple sources
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources
            .push(ConfigSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Add environment variables source
    pub fn with_env(mut self) -> Self {
        self.sources.push(ConfigSource::Environment);
        self
    }

    /// Add explicit overrides
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.sources.push(ConfigSource::Overrides(overrides));
        self
    }

    /// Load configuration from all sources in order, then validate
    pub fn load(self) -> ChatResult<Config> {
        let mut config = Config::default();

        for source in self.sources {
            match source {
                ConfigSource::File(path) => {
                    debug!("Loading config from file: {}", path.display());
                    config = file_loader::load_from_file(&path)?;
                }
                ConfigSource::Environment => {
                    debug!("Loading config overrides from environment");
                    config.apply(env_loader::load_from_env()?);
                }
                ConfigSource::Overrides(overrides) => {
                    debug!("Applying explicit config overrides");
                    config.apply(overrides);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_win_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("docchat.toml");
        std::fs::write(&path, "[backend]\nchunk_size = 64\nbase_url = \"http://a:1\"\n").unwrap();

        let config = ConfigLoader::new()
            .with_file(&path)
            .with_overrides(ConfigOverrides {
                base_url: Some("http://b:2".to_string()),
                ..Default::default()
            })
            .load()
            .unwrap();

        assert_eq!(config.backend.base_url, "http://b:2");
        assert_eq!(config.backend.chunk_size, 64);
    }

    #[test]
    fn test_invalid_result_is_rejected() {
        let result = ConfigLoader::new()
            .with_overrides(ConfigOverrides {
                chunk_size: Some(0),
                ..Default::default()
            })
            .load();
        assert!(result.is_err());
    }
}
