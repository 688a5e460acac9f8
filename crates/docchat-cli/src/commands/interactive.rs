//! Interactive prompt
//!
//! Plain lines are chat messages for the active session, including words
//! like `quit`. Lines starting with `/` are commands.

use crate::commands::{chat, files, sessions};
use crate::console::CliConsole;
use crate::controller::ChatController;
use colored::*;
use docchat_core::ChatBackend;
use docchat_core::error::ChatResult;
use docchat_session::SessionStorage;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Consecutive input failures after which the prompt gives up
const MAX_READ_FAILURES: u32 = 3;

/// A parsed prompt line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Nothing to do
    Empty,
    /// Chat message for the active session
    Message(String),
    New,
    Sessions,
    Switch(String),
    Delete(String),
    Upload(Vec<PathBuf>),
    Files,
    /// 1-based file position
    Remove(usize),
    RemoveAll,
    History,
    Clear,
    Help,
    Quit,
    /// A command with missing or malformed arguments
    Usage(&'static str),
    Unknown(String),
}

/// Parse one prompt line
pub fn parse_line(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return Input::Message(trimmed.to_string());
    };

    let mut parts = rest.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    match command.as_str() {
        "new" => Input::New,
        "sessions" | "ls" => Input::Sessions,
        "switch" => match args.as_slice() {
            [id] => Input::Switch(id.to_string()),
            _ => Input::Usage("/switch <session-id>"),
        },
        "delete" => match args.as_slice() {
            [id] => Input::Delete(id.to_string()),
            _ => Input::Usage("/delete <session-id>"),
        },
        "upload" => {
            if args.is_empty() {
                Input::Usage("/upload <path>...")
            } else {
                Input::Upload(args.iter().map(|arg| PathBuf::from(*arg)).collect())
            }
        }
        "files" => Input::Files,
        "remove" => match args.as_slice() {
            [n] => match n.parse::<usize>() {
                Ok(position) if position > 0 => Input::Remove(position),
                _ => Input::Usage("/remove <file-number>"),
            },
            _ => Input::Usage("/remove <file-number>"),
        },
        "remove-all" => Input::RemoveAll,
        "history" => Input::History,
        "clear" => Input::Clear,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    }
}

fn print_help(console: &CliConsole) {
    console.print_header("Commands");
    let rows = [
        ("<text>", "Ask a question about the uploaded documents"),
        ("/upload <path>...", "Upload .pdf, .txt or .docx files"),
        ("/files", "List attached files"),
        ("/remove <n>", "Detach file number n"),
        ("/remove-all", "Detach all files"),
        ("/history", "Show the transcript"),
        ("/clear", "Clear the transcript"),
        ("/new", "Start a new session"),
        ("/sessions", "List sessions"),
        ("/switch <id>", "Switch to a session"),
        ("/delete <id>", "Delete a session"),
        ("/quit", "Leave"),
    ];
    for (command, description) in rows {
        println!("  {:<20} {}", command.cyan(), description);
    }
}

/// Run one parsed input; returns false when the loop should stop
async fn dispatch<S: SessionStorage, B: ChatBackend>(
    ctl: &mut ChatController<S, B>,
    console: &mut CliConsole,
    input: Input,
) -> ChatResult<bool> {
    match input {
        Input::Empty => {}
        Input::Message(text) => chat::send(ctl, console, &text).await?,
        Input::New => sessions::create(ctl, console).await?,
        Input::Sessions => sessions::list(ctl, console),
        Input::Switch(id) => sessions::switch(ctl, console, &id).await?,
        Input::Delete(id) => sessions::delete(ctl, console, &id, false).await?,
        Input::Upload(paths) => files::upload(ctl, console, &paths).await?,
        Input::Files => files::list(ctl, console),
        Input::Remove(position) => files::remove(ctl, console, position).await?,
        Input::RemoveAll => files::remove_all(ctl, console).await?,
        Input::History => chat::history(ctl, console),
        Input::Clear => chat::clear(ctl, console).await?,
        Input::Help => print_help(console),
        Input::Quit => return Ok(false),
        Input::Usage(usage) => console.warn(&format!("Usage: {usage}")),
        Input::Unknown(command) => {
            console.warn(&format!("Unknown command /{command}. Type /help for commands."))
        }
    }
    Ok(true)
}

/// What the loop does with one read attempt
#[derive(Debug, PartialEq)]
enum ReadStep {
    Line(String),
    Retry,
    Stop,
}

/// Classify a read result, reporting failures without ending the prompt
///
/// Only end of input, or too many failures in a row, stops the loop.
fn next_step(
    read: io::Result<Option<String>>,
    failures: &mut u32,
    console: &CliConsole,
) -> ReadStep {
    match read {
        Ok(Some(line)) => {
            *failures = 0;
            ReadStep::Line(line)
        }
        Ok(None) => ReadStep::Stop,
        Err(e) => {
            *failures += 1;
            warn!("Failed to read input ({} in a row): {}", failures, e);
            console.error(&format!("Could not read input: {e}"));
            if *failures >= MAX_READ_FAILURES {
                ReadStep::Stop
            } else {
                ReadStep::Retry
            }
        }
    }
}

/// Run the prompt until `/quit` or end of input
pub async fn run<S: SessionStorage, B: ChatBackend>(
    ctl: &mut ChatController<S, B>,
    console: &mut CliConsole,
) -> ChatResult<()> {
    console.print_header("DocChat");
    console.info("Type a question, or /help for commands.");

    let mut failures = 0;
    loop {
        let prompt = ctl.store().active_id().to_string();
        let line = match next_step(console.input(&prompt), &mut failures, console) {
            ReadStep::Line(line) => line,
            ReadStep::Retry => continue,
            ReadStep::Stop => break,
        };

        let input = parse_line(&line);
        debug!("Prompt input: {:?}", input);
        match dispatch(ctl, console, input).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => console.error(&e.to_string()),
        }
    }

    console.info("Goodbye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_message() {
        assert_eq!(
            parse_line("  what is section 2 about?  "),
            Input::Message("what is section 2 about?".to_string())
        );
        assert_eq!(parse_line("   "), Input::Empty);
    }

    #[test]
    fn test_quit_words_without_slash_are_messages() {
        for word in ["quit", "exit", "q"] {
            assert_eq!(parse_line(word), Input::Message(word.to_string()));
        }
        assert_eq!(parse_line("/exit"), Input::Quit);
        assert_eq!(parse_line("/q"), Input::Quit);
    }

    #[test]
    fn test_read_errors_keep_prompt_running() {
        let console = CliConsole::new(false);
        let mut failures = 0;
        let bad_utf8 = || {
            Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            ))
        };

        assert_eq!(next_step(bad_utf8(), &mut failures, &console), ReadStep::Retry);
        assert_eq!(
            next_step(Ok(Some("hello".to_string())), &mut failures, &console),
            ReadStep::Line("hello".to_string())
        );
        assert_eq!(failures, 0);

        assert_eq!(next_step(bad_utf8(), &mut failures, &console), ReadStep::Retry);
        assert_eq!(next_step(bad_utf8(), &mut failures, &console), ReadStep::Retry);
        assert_eq!(next_step(bad_utf8(), &mut failures, &console), ReadStep::Stop);
        assert_eq!(next_step(Ok(None), &mut 0, &console), ReadStep::Stop);
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(parse_line("/new"), Input::New);
        assert_eq!(parse_line("/SESSIONS"), Input::Sessions);
        assert_eq!(
            parse_line("/switch k3j9x0ab"),
            Input::Switch("k3j9x0ab".to_string())
        );
        assert!(matches!(parse_line("/switch"), Input::Usage(_)));
        assert!(matches!(parse_line("/delete a b"), Input::Usage(_)));
    }

    #[test]
    fn test_file_commands() {
        assert_eq!(
            parse_line("/upload a.pdf docs/b.txt"),
            Input::Upload(vec![PathBuf::from("a.pdf"), PathBuf::from("docs/b.txt")])
        );
        assert!(matches!(parse_line("/upload"), Input::Usage(_)));
        assert_eq!(parse_line("/remove 2"), Input::Remove(2));
        assert!(matches!(parse_line("/remove 0"), Input::Usage(_)));
        assert!(matches!(parse_line("/remove x"), Input::Usage(_)));
        assert_eq!(parse_line("/remove-all"), Input::RemoveAll);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse_line("/frobnicate"), Input::Unknown("frobnicate".to_string()));
        assert_eq!(parse_line("/quit"), Input::Quit);
    }
}
