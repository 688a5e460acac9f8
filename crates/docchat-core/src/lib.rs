//! DocChat core library
//!
//! Shared building blocks for the DocChat client:
//! - `error`: the unified error type
//! - `config`: layered configuration (file, environment, flags)
//! - `api`: the HTTP client for the retrieval/chat backend

pub mod api;
pub mod config;
pub mod error;

pub use api::{BackendClient, ChatBackend};
pub use config::{Config, ConfigLoader};
pub use error::{ChatError, ChatResult};
