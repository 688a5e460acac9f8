//! Configuration management commands

use crate::console::CliConsole;
use docchat_core::config::Config;
use docchat_core::config::file_loader::render_config;
use docchat_core::error::{ChatError, ChatResult};
use std::path::Path;

/// Show the effective configuration
pub fn show(console: &CliConsole, config: &Config, config_file: &Path) -> ChatResult<()> {
    console.print_header("Configuration");

    if config_file.exists() {
        console.success(&format!("Loaded configuration from: {}", config_file.display()));
    } else {
        console.warn(&format!(
            "Configuration file not found: {}",
            config_file.display()
        ));
        console.info("Using defaults with environment and flag overrides");
    }

    console.print_separator();
    println!("{}", render_config(config, config_file)?);
    Ok(())
}

/// Write a default configuration file
pub async fn init(console: &CliConsole, config_file: &Path, force: bool) -> ChatResult<()> {
    if config_file.exists() && !force {
        return Err(ChatError::config(format!(
            "Configuration file already exists: {} (use --force to overwrite)",
            config_file.display()
        )));
    }

    let content = render_config(&Config::default(), config_file)?;
    if let Some(parent) = config_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(config_file, content).await?;

    console.success(&format!(
        "Created configuration file: {}",
        config_file.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_core::config::ConfigLoader;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_loadable_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("docchat.toml");
        let console = CliConsole::new(false);

        init(&console, &path, false).await.unwrap();
        let config = ConfigLoader::new().with_file(&path).load().unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("docchat.toml");
        std::fs::write(&path, "[backend]\nchunk_size = 64\n").unwrap();
        let console = CliConsole::new(false);

        assert!(init(&console, &path, false).await.is_err());
        init(&console, &path, true).await.unwrap();
        let config = ConfigLoader::new().with_file(&path).load().unwrap();
        assert_eq!(config.backend.chunk_size, 256);
    }
}
