//! CLI commands
//!
//! Each handler works on an injected controller and prints through the
//! console; the same handlers back the subcommands and the interactive
//! slash commands.

pub mod chat;
pub mod config;
pub mod files;
pub mod interactive;
pub mod sessions;
