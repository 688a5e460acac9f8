//! File-based configuration loading

use crate::config::model::Config;
use crate::error::{ChatError, ChatResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> ChatResult<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ChatError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    parse_config(&content, path)
}

/// Serialize a config in the format implied by the path's extension
pub fn render_config(config: &Config, path: &Path) -> ChatResult<String> {
    let rendered = match extension(path) {
        Format::Toml => toml::to_string_pretty(config)
            .map_err(|e| ChatError::config(format!("Failed to render TOML config: {}", e)))?,
        Format::Yaml => serde_yaml::to_string(config)
            .map_err(|e| ChatError::config(format!("Failed to render YAML config: {}", e)))?,
        Format::Json => serde_json::to_string_pretty(config)?,
    };
    Ok(rendered)
}

enum Format {
    Json,
    Toml,
    Yaml,
}

fn extension(path: &Path) -> Format {
    match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => Format::Toml,
        Some("yaml") | Some("yml") => Format::Yaml,
        _ => Format::Json,
    }
}

fn parse_config(content: &str, path: &Path) -> ChatResult<Config> {
    let config: Config = match extension(path) {
        Format::Toml => toml::from_str(content).map_err(|e| {
            ChatError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| {
            ChatError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        Format::Json => serde_json::from_str(content).map_err(|e| {
            ChatError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}
