//! Local filesystem session storage
//!
//! Stores the session map as a single JSON file in the user's data directory.

use super::{SESSIONS_FILE_NAME, SessionStorage, StorageError, StorageResult};
use crate::SessionMap;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Local filesystem session storage
///
/// Sessions are stored in:
/// - `~/.docchat/doc-chat-sessions.json` (default)
/// - `<dir>/doc-chat-sessions.json` for a custom directory
pub struct LocalSessionStorage {
    /// Directory holding the session file
    base_path: PathBuf,
}

impl LocalSessionStorage {
    /// Create storage with default path (~/.docchat)
    pub fn new() -> StorageResult<Self> {
        let base_path = dirs::home_dir()
            .ok_or(StorageError::PathUnavailable)?
            .join(".docchat");

        Ok(Self { base_path })
    }

    /// Create storage with custom base directory
    pub fn with_path(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Full path of the session file
    pub fn file_path(&self) -> PathBuf {
        self.base_path.join(SESSIONS_FILE_NAME)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for LocalSessionStorage {
    async fn load(&self) -> StorageResult<SessionMap> {
        let path = self.file_path();

        if !path.exists() {
            debug!("No session file at {:?}", path);
            return Ok(SessionMap::new());
        }

        let content = fs::read_to_string(&path).await?;
        let sessions: SessionMap = serde_json::from_str(&content)?;

        debug!("Loaded {} session(s) from {:?}", sessions.len(), path);
        Ok(sessions)
    }

    async fn save(&self, sessions: &SessionMap) -> StorageResult<()> {
        self.ensure_dir().await?;

        let path = self.file_path();
        let tmp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(sessions)?;

        // tmp file + rename so a crash never leaves a truncated file behind
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &path).await?;
        debug!("Saved {} session(s) to {:?}", sessions.len(), path);

        Ok(())
    }

    fn location(&self) -> String {
        self.file_path().display().to_string()
    }
}
