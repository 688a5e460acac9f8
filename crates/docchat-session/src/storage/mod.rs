//! Session storage abstraction and implementations
//!
//! The whole session map is persisted as one unit. Provides a local JSON
//! file backend and an in-memory backend.

mod local;
mod memory;

pub use local::LocalSessionStorage;
pub use memory::MemorySessionStorage;

use crate::SessionMap;
use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Fixed name of the persisted session file
pub const SESSIONS_FILE_NAME: &str = "doc-chat-sessions.json";

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid session data: {0}")]
    InvalidData(String),

    #[error("Storage path not available")]
    PathUnavailable,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Session storage trait for different backends
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read the persisted mapping
    ///
    /// A missing slot is an empty mapping, not an error.
    async fn load(&self) -> StorageResult<SessionMap>;

    /// Persist the full mapping, replacing whatever was stored
    async fn save(&self, sessions: &SessionMap) -> StorageResult<()>;

    /// Short description of where sessions live, for diagnostics
    fn location(&self) -> String;

    /// Read the persisted mapping, treating any failure as "no sessions"
    async fn load_or_empty(&self) -> SessionMap {
        match self.load().await {
            Ok(sessions) => sessions,
            Err(e) => {
                warn!(
                    "Ignoring unreadable session data at {}: {}",
                    self.location(),
                    e
                );
                SessionMap::new()
            }
        }
    }
}

#[async_trait]
impl<S: SessionStorage + ?Sized> SessionStorage for Box<S> {
    async fn load(&self) -> StorageResult<SessionMap> {
        (**self).load().await
    }

    async fn save(&self, sessions: &SessionMap) -> StorageResult<()> {
        (**self).save(sessions).await
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
