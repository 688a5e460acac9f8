//! In-memory session storage
//!
//! Keeps the serialized JSON text rather than the map itself, so a reload
//! behaves like the file backend (file handles do not survive).

use super::{SessionStorage, StorageResult};
use crate::SessionMap;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory storage slot, cheap to clone and share
#[derive(Clone, Default)]
pub struct MemorySessionStorage {
    slot: Arc<Mutex<Option<String>>>,
    saves: Arc<AtomicUsize>,
}

impl MemorySessionStorage {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-filled with raw text
    pub fn with_contents(raw: impl Into<String>) -> Self {
        let storage = Self::default();
        *storage.slot.lock() = Some(raw.into());
        storage
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> StorageResult<SessionMap> {
        let raw = self.slot.lock().clone();
        match raw {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(SessionMap::new()),
        }
    }

    async fn save(&self, sessions: &SessionMap) -> StorageResult<()> {
        let raw = serde_json::to_string(sessions)?;
        *self.slot.lock() = Some(raw);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
