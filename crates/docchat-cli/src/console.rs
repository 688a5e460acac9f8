//! CLI console utilities

use colored::*;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Turn off ANSI colors when stdout is not a color-capable terminal
pub fn configure_colors() {
    if !::console::Term::stdout().features().colors_supported() {
        colored::control::set_override(false);
    }
}

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
    progress_bar: Option<ProgressBar>,
}

impl CliConsole {
    /// Create a new CLI console
    pub const fn new(verbose: bool) -> Self {
        Self {
            verbose,
            progress_bar: None,
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{} {}", "ℹ".blue().bold(), message);
    }

    /// Print a message only in verbose mode
    pub fn detail(&self, message: &str) {
        if self.verbose {
            println!("  {}", message.dimmed());
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.chars().count()).dimmed());
    }

    /// Print a separator
    pub fn print_separator(&self) {
        println!("{}", "-".repeat(50).dimmed());
    }

    /// Print a transcript, dimming the separator lines between exchanges
    pub fn print_transcript(&self, history: &str) {
        if history.trim().is_empty() {
            println!("{}", "No chat yet".dimmed());
            return;
        }

        for line in history.lines() {
            if line.starts_with("Q:") {
                println!("{}", line.cyan().bold());
            } else if !line.is_empty() && line.chars().all(|c| c == '-') {
                println!("{}", line.dimmed());
            } else {
                println!("{}", line);
            }
        }
    }

    /// Start a spinner while a backend call is in flight
    pub fn start_progress(&mut self, message: &str) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        self.progress_bar = Some(pb);
    }

    /// Stop the spinner and erase it
    pub fn finish_progress(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Ask for user confirmation, defaulting to no
    pub fn confirm(&self, message: &str) -> io::Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|e| io::Error::other(e.to_string()))
    }

    /// Read one line of input
    ///
    /// Returns `None` at end of input.
    pub fn input(&self, prompt: &str) -> io::Result<Option<String>> {
        print!("{} ", format!("{prompt}>").blue().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
