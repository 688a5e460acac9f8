//! Logging configuration

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Levels accepted by the subscriber filter
    pub const LEVELS: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];

    /// Formats understood by the CLI subscriber
    pub const FORMATS: [&'static str; 3] = ["pretty", "compact", "json"];

    /// Check if the configured level is known
    pub fn has_valid_level(&self) -> bool {
        Self::LEVELS.contains(&self.level.to_lowercase().as_str())
    }

    /// Check if the configured format is known
    pub fn has_valid_format(&self) -> bool {
        Self::FORMATS.contains(&self.format.to_lowercase().as_str())
    }
}
