//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies.
//! Logs always go to stderr so they never mix with command output.

use anyhow::anyhow;
use docchat_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directive(config))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format.to_lowercase().as_str() {
        "json" => builder.json().try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder.pretty().try_init(),
    };
    result.map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

/// Filter directive for the configured level
///
/// Only this workspace's crates log at the configured level; dependencies
/// stay at `warn`.
fn filter_directive(config: &LoggingConfig) -> String {
    let level = config.level.to_lowercase();
    format!("warn,docchat={level},docchat_core={level},docchat_session={level},docchat_cli={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_scopes_crates() {
        let config = LoggingConfig {
            level: "DEBUG".to_string(),
            ..Default::default()
        };
        let directive = filter_directive(&config);
        assert!(directive.starts_with("warn,"));
        assert!(directive.contains("docchat_session=debug"));
        assert!(EnvFilter::try_new(&directive).is_ok());
    }
}
