//! Environment variable-based configuration overrides
//!
//! Recognised variables:
//! - `DOCCHAT_BASE_URL`
//! - `DOCCHAT_CHUNK_SIZE`
//! - `DOCCHAT_TEMPERATURE`
//! - `DOCCHAT_STORAGE_DIR`
//! - `DOCCHAT_LOG_LEVEL`
//! - `DOCCHAT_LOG_FORMAT`

use crate::config::model::ConfigOverrides;
use crate::error::{ChatError, ChatResult};
use std::env;
use std::path::PathBuf;

/// Read overrides from the process environment
pub fn load_from_env() -> ChatResult<ConfigOverrides> {
    load_from_lookup(|key| env::var(key).ok())
}

/// Read overrides through an arbitrary variable lookup
pub fn load_from_lookup<F>(lookup: F) -> ChatResult<ConfigOverrides>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut overrides = ConfigOverrides::default();

    overrides.base_url = var("DOCCHAT_BASE_URL");

    if let Some(raw) = var("DOCCHAT_CHUNK_SIZE") {
        let chunk_size = raw.trim().parse().map_err(|_| {
            ChatError::config_with_context(
                "Invalid DOCCHAT_CHUNK_SIZE value",
                format!("Parsing chunk size '{}'", raw),
            )
        })?;
        overrides.chunk_size = Some(chunk_size);
    }

    if let Some(raw) = var("DOCCHAT_TEMPERATURE") {
        let temperature = raw.trim().parse().map_err(|_| {
            ChatError::config_with_context(
                "Invalid DOCCHAT_TEMPERATURE value",
                format!("Parsing temperature '{}'", raw),
            )
        })?;
        overrides.temperature = Some(temperature);
    }

    overrides.storage_dir = var("DOCCHAT_STORAGE_DIR").map(PathBuf::from);
    overrides.log_level = var("DOCCHAT_LOG_LEVEL");
    overrides.log_format = var("DOCCHAT_LOG_FORMAT");

    Ok(overrides)
}
