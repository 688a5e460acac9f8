//! CLI argument definitions using clap
//!
//! - docchat                      # Interactive prompt (default)
//! - docchat upload a.pdf b.txt   # One-shot commands against the active session
//! - docchat --session k3j9x0ab send "What is it about?"
//! - docchat config show|init     # Utility commands

use clap::{Parser, Subcommand};
use docchat_core::config::{ConfigOverrides, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docchat")]
#[command(about = "DocChat - chat with your documents through a retrieval backend")]
#[command(
    long_about = r#"DocChat - chat with your documents through a retrieval backend

USAGE:
  docchat                          # Start the interactive prompt
  docchat upload report.pdf        # Upload documents to the active session
  docchat send "Summarize it"      # Ask a question
  docchat sessions                 # List sessions

UTILITY COMMANDS:
  docchat config init              # Create config file
  docchat config show              # Show effective config

For detailed help: docchat --help"#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Backend base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory holding the session file
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Session to operate on (created if missing)
    #[arg(long, short, global = true)]
    pub session: Option<String>,

    /// Chunk size sent with uploads
    #[arg(long, global = true)]
    pub chunk_size: Option<u32>,

    /// Keep sessions in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Flags that override file and environment settings
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            chunk_size: self.chunk_size,
            storage_dir: self.storage_dir.clone(),
            log_level: self.verbose.then(|| "debug".to_string()),
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List sessions with a short preview
    Sessions,

    /// Create a new empty session
    New,

    /// Delete a session and its history
    Delete {
        /// Session id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Upload documents to the backend for the active session
    Upload {
        /// Files to upload (.pdf, .txt, .docx)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List files attached to the active session
    Files,

    /// Detach a file from the active session
    Remove {
        /// Position as shown by `files` (starting at 1)
        index: usize,
    },

    /// Detach all files from the active session
    RemoveAll,

    /// Send a message and print the updated transcript
    Send {
        /// Message text
        message: String,
    },

    /// Print the transcript of the active session
    History,

    /// Clear the transcript on the backend and locally
    Clear,

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
