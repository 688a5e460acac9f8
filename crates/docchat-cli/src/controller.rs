//! Binds the session store to the backend client
//!
//! Each backend call captures its target session in a request token before
//! the request is sent. Failures leave the store untouched.

use docchat_core::api::{
    ChatBackend, ChatRequest, read_ingest_file, validate_message, validate_upload_paths,
};
use docchat_core::config::BackendConfig;
use docchat_core::error::{ChatError, ChatResult};
use docchat_session::{ApplyOutcome, SessionStorage, SessionStore, UploadedFile};
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of a successful upload
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Status line for the user
    pub message: String,
    /// Chunks the backend reported creating
    pub chunks_created: Option<usize>,
    /// Files newly attached to the session (duplicates excluded)
    pub attached: Vec<UploadedFile>,
    pub applied: ApplyOutcome,
}

/// Result of a successful chat exchange
#[derive(Debug, Clone)]
pub struct SendOutcome {
    /// The latest answer, when the backend reports it separately
    pub answer: Option<String>,
    pub applied: ApplyOutcome,
}

/// Store plus backend, both injected
pub struct ChatController<S: SessionStorage, B: ChatBackend> {
    store: SessionStore<S>,
    backend: B,
    chunk_size: u32,
    temperature: Option<f32>,
}

impl<S: SessionStorage, B: ChatBackend> ChatController<S, B> {
    pub fn new(store: SessionStore<S>, backend: B, config: &BackendConfig) -> Self {
        Self {
            store,
            backend,
            chunk_size: config.chunk_size,
            temperature: config.temperature,
        }
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SessionStore<S> {
        &mut self.store
    }

    /// Upload files to the backend and attach them to the active session
    pub async fn upload(&mut self, paths: &[PathBuf]) -> ChatResult<UploadOutcome> {
        validate_upload_paths(paths)?;

        let mut descriptors = Vec::with_capacity(paths.len());
        let mut parts = Vec::with_capacity(paths.len());
        for path in paths {
            descriptors.push(UploadedFile::from_path(path).map_err(|e| {
                ChatError::io_with_path(e.to_string(), path.display().to_string())
            })?);
            parts.push(read_ingest_file(path).await?);
        }

        let token = self.store.active_request_token();
        info!(
            "Uploading {} file(s) for session {}",
            parts.len(),
            token.session_id()
        );

        let response = self.backend.ingest(parts, self.chunk_size).await?;

        let mut attached: Vec<UploadedFile> = Vec::new();
        if let Some(session) = self.store.get(token.session_id()) {
            for file in &descriptors {
                if !session.has_file(&file.name) && !attached.iter().any(|f| f.name == file.name) {
                    attached.push(file.clone());
                }
            }
        }

        let applied = self.store.apply_uploaded_files(&token, descriptors).await?;
        if !applied.is_applied() {
            attached.clear();
            warn!(
                "Session {} was removed during upload; files not recorded",
                token.session_id()
            );
        }

        let message = if response.message.trim().is_empty() {
            "Upload complete".to_string()
        } else {
            response.message
        };

        Ok(UploadOutcome {
            message,
            chunks_created: response.chunks_created,
            attached,
            applied,
        })
    }

    /// Send a message for the active session and store the new transcript
    pub async fn send(&mut self, message: &str) -> ChatResult<SendOutcome> {
        validate_message(message)?;

        let token = self.store.active_request_token();
        let request =
            ChatRequest::new(token.session_id(), message).with_temperature(self.temperature);
        let response = self.backend.chat(request).await?;

        let applied = self
            .store
            .apply_chat_history(&token, response.history)
            .await?;
        if !applied.is_applied() {
            warn!(
                "Session {} was removed while waiting for a reply",
                token.session_id()
            );
        }

        Ok(SendOutcome {
            answer: response.answer,
            applied,
        })
    }

    /// Clear the active session's transcript on the backend, then locally
    pub async fn clear_history(&mut self) -> ChatResult<String> {
        let token = self.store.active_request_token();
        let response = self.backend.clear(token.session_id()).await?;
        self.store.apply_cleared_history(&token).await?;

        Ok(response.summary().to_string())
    }
}
