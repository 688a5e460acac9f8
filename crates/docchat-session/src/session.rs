//! Session data structures
//!
//! Defines the core types for a conversation session:
//! - Session: the backend-authored transcript plus attached files
//! - UploadedFile: a file attached to a session, unique by name

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SESSION_ID_LEN: usize = 8;
const SESSION_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Number of transcript characters shown in a session preview
const PREVIEW_CHARS: usize = 40;

/// Generate a short opaque session id (8 chars of `[a-z0-9]`)
pub fn generate_session_id() -> String {
    let mut rng = rand::thread_rng();
    (0..SESSION_ID_LEN)
        .map(|_| SESSION_ID_CHARSET[rng.gen_range(0..SESSION_ID_CHARSET.len())] as char)
        .collect()
}

/// A file attached to a session
///
/// Only `name` and `size` are persisted. The `source` path is an in-memory
/// handle and is absent after the store is reloaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// File name, the deduplication key within a session
    pub name: String,

    /// Size in bytes when the file was attached
    #[serde(default)]
    pub size: u64,

    /// Local path the file was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl UploadedFile {
    /// Create a descriptor without a source handle
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            source: None,
        }
    }

    /// Build a descriptor from a file on disk
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            size: metadata.len(),
            source: Some(path.to_path_buf()),
        })
    }

    /// Attach a source path
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Whether the file content is still reachable
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }
}

// The source handle does not survive serialization, so it is not part of equality.
impl PartialEq for UploadedFile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.size == other.size
    }
}

impl Eq for UploadedFile {}

/// One conversation: transcript and attached files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Full formatted transcript as returned by the backend
    #[serde(default)]
    pub chat_history: String,

    /// Attached files, unique by name, in attach order
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
}

impl Session {
    /// Create a new empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the transcript
    pub fn chat_history(&self) -> &str {
        &self.chat_history
    }

    /// Replace the transcript wholesale
    pub fn set_chat_history(&mut self, text: impl Into<String>) {
        self.chat_history = text.into();
    }

    /// Get attached files
    pub fn uploaded_files(&self) -> &[UploadedFile] {
        &self.uploaded_files
    }

    /// Check whether a file with this name is attached
    pub fn has_file(&self, name: &str) -> bool {
        self.uploaded_files.iter().any(|f| f.name == name)
    }

    /// Merge files into the list, first write wins by name
    ///
    /// Returns the files that were accepted, in input order.
    pub fn append_files(
        &mut self,
        files: impl IntoIterator<Item = UploadedFile>,
    ) -> Vec<UploadedFile> {
        let mut accepted = Vec::new();
        for file in files {
            if self.has_file(&file.name) {
                continue;
            }
            self.uploaded_files.push(file.clone());
            accepted.push(file);
        }
        accepted
    }

    /// Remove the file at `index`; out of range is ignored
    pub fn remove_file(&mut self, index: usize) -> Option<UploadedFile> {
        if index < self.uploaded_files.len() {
            Some(self.uploaded_files.remove(index))
        } else {
            None
        }
    }

    /// Drop all attached files, returning how many were removed
    pub fn clear_files(&mut self) -> usize {
        let count = self.uploaded_files.len();
        self.uploaded_files.clear();
        count
    }

    /// Check if the session has neither history nor files
    pub fn is_empty(&self) -> bool {
        self.chat_history.is_empty() && self.uploaded_files.is_empty()
    }

    /// Short single-line preview of the transcript for session listings
    pub fn preview(&self) -> String {
        if self.chat_history.is_empty() {
            return "No chat yet".to_string();
        }

        let head: String = self
            .chat_history
            .chars()
            .take(PREVIEW_CHARS)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_shape() {
        let id = generate_session_id();
        assert_eq!(id.len(), 8);
        assert!(
            id.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_append_skips_existing_names() {
        let mut session = Session::new();
        session.append_files([UploadedFile::new("a.txt", 1)]);

        let accepted =
            session.append_files([UploadedFile::new("a.txt", 99), UploadedFile::new("b.txt", 2)]);

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "b.txt");
        let names: Vec<_> = session.uploaded_files().iter().map(|f| &f.name).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
        // first write wins
        assert_eq!(session.uploaded_files()[0].size, 1);
    }

    #[test]
    fn test_append_dedups_within_batch() {
        let mut session = Session::new();
        session.append_files([
            UploadedFile::new("x.pdf", 1),
            UploadedFile::new("x.pdf", 2),
            UploadedFile::new("y.pdf", 3),
        ]);
        assert_eq!(session.uploaded_files().len(), 2);
    }

    #[test]
    fn test_remove_file_out_of_range() {
        let mut session = Session::new();
        session.append_files([UploadedFile::new("a.txt", 1)]);

        assert!(session.remove_file(3).is_none());
        assert_eq!(session.uploaded_files().len(), 1);

        let removed = session.remove_file(0).unwrap();
        assert_eq!(removed.name, "a.txt");
        assert!(session.uploaded_files().is_empty());
    }

    #[test]
    fn test_preview() {
        let mut session = Session::new();
        assert_eq!(session.preview(), "No chat yet");

        session.set_chat_history("Q: hi\nA: hello");
        assert_eq!(session.preview(), "Q: hi A: hello...");

        session.set_chat_history("x".repeat(100));
        assert_eq!(session.preview(), format!("{}...", "x".repeat(40)));
    }

    #[test]
    fn test_serialized_layout() {
        let mut session = Session::new();
        session.set_chat_history("Q: a");
        session.append_files([UploadedFile::new("a.txt", 3).with_source("/tmp/a.txt")]);

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "chatHistory": "Q: a",
                "uploadedFiles": [{"name": "a.txt", "size": 3}]
            })
        );

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
        assert!(!back.uploaded_files()[0].has_source());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let file = UploadedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "notes.txt");
        assert_eq!(file.size, 5);
        assert!(file.has_source());
    }
}
