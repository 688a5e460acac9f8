//! Write-through session store
//!
//! `SessionStore` owns the session map and the active session id. Every
//! mutating operation persists the full map before it returns, and the
//! active id always names an existing session.
//!
//! Mutations are staged on a copy of the map. The copy replaces the live
//! state only after it has been saved, so a failed save changes nothing.

use crate::{
    Session, SessionMap, SessionStorage, StorageError, StorageResult, UploadedFile,
    generate_session_id,
};
use tracing::{debug, info};

/// Captured target of an in-flight backend request
///
/// A response is applied to the session named here, and only if that
/// session still exists when the response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    session_id: String,
}

impl RequestToken {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Result of applying a response through a [`RequestToken`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The target session existed and was updated
    Applied,
    /// The target session is gone; the response was dropped
    Discarded,
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied)
    }
}

/// Session store with write-through persistence
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    sessions: SessionMap,
    active_id: String,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Load-or-empty, then make sure an active session exists
    ///
    /// The first stored session becomes active; with none stored a fresh
    /// one is created.
    pub async fn open(storage: S) -> StorageResult<Self> {
        let sessions = storage.load_or_empty().await;
        let active_id = sessions
            .first_id()
            .map(str::to_string)
            .unwrap_or_else(generate_session_id);

        let mut store = Self {
            storage,
            sessions,
            active_id: active_id.clone(),
        };
        store.ensure_session(&active_id).await?;

        info!(
            "Opened session store at {} ({} session(s), active {})",
            store.storage.location(),
            store.sessions.len(),
            store.active_id
        );
        Ok(store)
    }

    /// Persist the full mapping
    pub async fn save(&self) -> StorageResult<()> {
        self.storage.save(&self.sessions).await
    }

    /// Insert an empty session under `id` if it is missing
    ///
    /// Returns whether a session was created. A blank id is rejected.
    pub async fn ensure_session(&mut self, id: &str) -> StorageResult<bool> {
        if id.trim().is_empty() {
            return Err(StorageError::InvalidData(
                "session id must not be empty".to_string(),
            ));
        }
        if self.sessions.contains(id) {
            return Ok(false);
        }

        let mut next = self.sessions.clone();
        next.insert(id, Session::new());
        self.commit(next).await?;
        debug!("Materialized session {}", id);
        Ok(true)
    }

    /// Create a fresh empty session and make it active
    pub async fn create_session(&mut self) -> StorageResult<String> {
        let id = self.fresh_id();
        let mut next = self.sessions.clone();
        next.insert(id.clone(), Session::new());
        self.commit(next).await?;
        self.active_id = id.clone();

        info!("Created session {}", id);
        Ok(id)
    }

    /// Make `id` the active session, creating it if needed
    pub async fn switch_session(&mut self, id: &str) -> StorageResult<()> {
        self.ensure_session(id).await?;
        self.active_id = id.to_string();
        debug!("Switched to session {}", id);
        Ok(())
    }

    /// Delete a session
    ///
    /// Confirmation is the caller's job. When the active session is deleted,
    /// the first remaining session becomes active, or a new empty one is
    /// created. Returns false if `id` did not exist.
    pub async fn delete_session(&mut self, id: &str) -> StorageResult<bool> {
        let mut next = self.sessions.clone();
        if next.remove(id).is_none() {
            return Ok(false);
        }

        let mut active_id = self.active_id.clone();
        if active_id == id {
            active_id = match next.first_id() {
                Some(first) => first.to_string(),
                None => {
                    let fresh = self.fresh_id();
                    next.insert(fresh.clone(), Session::new());
                    fresh
                }
            };
            debug!("Active session is now {}", active_id);
        }

        self.commit(next).await?;
        self.active_id = active_id;
        info!("Deleted session {}", id);
        Ok(true)
    }

    /// Attach files to a session, skipping names already present
    ///
    /// Returns the files that were accepted.
    pub async fn append_files(
        &mut self,
        id: &str,
        files: Vec<UploadedFile>,
    ) -> StorageResult<Vec<UploadedFile>> {
        let mut next = self.sessions.clone();
        let accepted = next.entry_or_default(id).append_files(files);
        self.commit(next).await?;
        Ok(accepted)
    }

    /// Remove the file at `index`
    ///
    /// An unknown session or out-of-range index changes nothing.
    pub async fn remove_file(
        &mut self,
        id: &str,
        index: usize,
    ) -> StorageResult<Option<UploadedFile>> {
        let mut next = self.sessions.clone();
        let removed = match next.get_mut(id) {
            Some(session) => session.remove_file(index),
            None => None,
        };

        if removed.is_some() {
            self.commit(next).await?;
        }
        Ok(removed)
    }

    /// Drop all files of a session, returning how many were removed
    pub async fn clear_files(&mut self, id: &str) -> StorageResult<usize> {
        let mut next = self.sessions.clone();
        let count = next.entry_or_default(id).clear_files();
        self.commit(next).await?;
        Ok(count)
    }

    /// Replace the transcript of a session wholesale
    pub async fn set_chat_history(&mut self, id: &str, text: impl Into<String>) -> StorageResult<()> {
        let mut next = self.sessions.clone();
        next.entry_or_default(id).set_chat_history(text);
        self.commit(next).await
    }

    /// Capture `id` as the target of an outgoing request
    pub fn request_token(&self, id: &str) -> RequestToken {
        RequestToken {
            session_id: id.to_string(),
        }
    }

    /// Capture the active session as the target of an outgoing request
    pub fn active_request_token(&self) -> RequestToken {
        self.request_token(&self.active_id)
    }

    /// Apply a transcript returned by the backend
    pub async fn apply_chat_history(
        &mut self,
        token: &RequestToken,
        history: impl Into<String>,
    ) -> StorageResult<ApplyOutcome> {
        if !self.sessions.contains(token.session_id()) {
            return Ok(self.discard(token, "chat history"));
        }
        self.set_chat_history(token.session_id(), history).await?;
        Ok(ApplyOutcome::Applied)
    }

    /// Record files the backend accepted
    pub async fn apply_uploaded_files(
        &mut self,
        token: &RequestToken,
        files: Vec<UploadedFile>,
    ) -> StorageResult<ApplyOutcome> {
        if !self.sessions.contains(token.session_id()) {
            return Ok(self.discard(token, "uploaded files"));
        }
        self.append_files(token.session_id(), files).await?;
        Ok(ApplyOutcome::Applied)
    }

    /// Empty the local transcript after the backend cleared it
    pub async fn apply_cleared_history(
        &mut self,
        token: &RequestToken,
    ) -> StorageResult<ApplyOutcome> {
        self.apply_chat_history(token, String::new()).await
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.sessions.get(&self.active_id)
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains(id)
    }

    pub fn sessions(&self) -> &SessionMap {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist a staged map, then make it the live one
    async fn commit(&mut self, next: SessionMap) -> StorageResult<()> {
        self.storage.save(&next).await?;
        self.sessions = next;
        Ok(())
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = generate_session_id();
            if !self.sessions.contains(&id) {
                return id;
            }
        }
    }

    fn discard(&self, token: &RequestToken, what: &str) -> ApplyOutcome {
        debug!(
            "Discarding {} for session {}: session no longer exists",
            what,
            token.session_id()
        );
        ApplyOutcome::Discarded
    }
}
