//! File attachment commands

use crate::console::CliConsole;
use crate::controller::ChatController;
use docchat_core::ChatBackend;
use docchat_core::error::{ChatError, ChatResult};
use docchat_session::{SessionStorage, UploadedFile};
use std::path::PathBuf;

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Map a 1-based position from the UI to a list index
pub fn to_index(position: usize) -> ChatResult<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| ChatError::invalid_input_field("File numbers start at 1", "index"))
}

fn print_files(console: &CliConsole, files: &[UploadedFile]) {
    if files.is_empty() {
        console.info("No files attached");
        return;
    }
    for (i, file) in files.iter().enumerate() {
        println!("{:>3}. {}  ({})", i + 1, file.name, format_size(file.size));
    }
}

/// List files of the active session
pub fn list<S: SessionStorage, B: ChatBackend>(ctl: &ChatController<S, B>, console: &CliConsole) {
    console.print_header(&format!("Files in session {}", ctl.store().active_id()));
    let files = ctl
        .store()
        .active_session()
        .map(|s| s.uploaded_files())
        .unwrap_or_default();
    print_files(console, files);
}

/// Upload files and attach them to the active session
pub async fn upload<S: SessionStorage, B: ChatBackend>(
    ctl: &mut ChatController<S, B>,
    console: &mut CliConsole,
    paths: &[PathBuf],
) -> ChatResult<()> {
    console.start_progress("Uploading...");
    let result = ctl.upload(paths).await;
    console.finish_progress();
    let outcome = result?;

    console.success(&outcome.message);
    if let Some(chunks) = outcome.chunks_created {
        console.detail(&format!("{chunks} chunk(s) created"));
    }
    let skipped = paths.len().saturating_sub(outcome.attached.len());
    if outcome.applied.is_applied() && skipped > 0 {
        console.info(&format!("{skipped} file(s) were already attached"));
    }
    Ok(())
}

/// Detach the file at a 1-based position
pub async fn remove<S: SessionStorage, B: ChatBackend>(
    ctl: &mut ChatController<S, B>,
    console: &CliConsole,
    position: usize,
) -> ChatResult<()> {
    let index = to_index(position)?;
    let id = ctl.store().active_id().to_string();
    match ctl.store_mut().remove_file(&id, index).await? {
        Some(file) => console.success(&format!("Removed {}", file.name)),
        None => console.warn(&format!("No file at position {position}")),
    }
    Ok(())
}

/// Detach every file of the active session
pub async fn remove_all<S: SessionStorage, B: ChatBackend>(
    ctl: &mut ChatController<S, B>,
    console: &CliConsole,
) -> ChatResult<()> {
    let id = ctl.store().active_id().to_string();
    let count = ctl.store_mut().clear_files(&id).await?;
    console.success(&format!("Removed {count} file(s)"));
    Ok(())
}
