//! Backend API client
//!
//! Thin wrapper over the three endpoints of the retrieval/chat service:
//! - `POST /ingest` (multipart upload)
//! - `POST /chat` (JSON message, returns the full transcript)
//! - `POST /clear?session_id=..` (drops the server-side transcript)

mod client;
mod client_tests;
pub mod types;
pub mod validation;

pub use client::{BackendClient, ChatBackend};
pub use types::{ChatRequest, ChatResponse, ClearResponse, IngestFile, IngestResponse};
pub use validation::{
    SUPPORTED_EXTENSIONS, read_ingest_file, validate_message, validate_upload_paths,
};
