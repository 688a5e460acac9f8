//! Input checks performed before any request leaves the client

use super::types::IngestFile;
use crate::error::{ChatError, ChatResult};
use std::path::{Path, PathBuf};

/// Extensions the backend has document loaders for
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "txt", "docx"];

/// Reject a blank chat message
pub fn validate_message(message: &str) -> ChatResult<()> {
    if message.trim().is_empty() {
        return Err(ChatError::invalid_input_field(
            "Please type a message first",
            "message",
        ));
    }
    Ok(())
}

/// Check that a selection of files can be uploaded
pub fn validate_upload_paths(paths: &[PathBuf]) -> ChatResult<()> {
    if paths.is_empty() {
        return Err(ChatError::invalid_input_field(
            "Please select at least one file first",
            "files",
        ));
    }

    for path in paths {
        if !path.is_file() {
            return Err(ChatError::invalid_input_field(
                format!("Not a readable file: {}", path.display()),
                "files",
            ));
        }
        if !is_supported(path) {
            return Err(ChatError::invalid_input_field(
                format!(
                    "Unsupported file type: {} (expected one of .pdf, .txt, .docx)",
                    path.display()
                ),
                "files",
            ));
        }
    }
    Ok(())
}

/// Read a validated file into an upload part
pub async fn read_ingest_file(path: &Path) -> ChatResult<IngestFile> {
    let content = tokio::fs::read(path).await.map_err(|e| {
        ChatError::io_with_path(format!("Failed to read file: {}", e), path.display().to_string())
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(IngestFile::new(name, content))
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
