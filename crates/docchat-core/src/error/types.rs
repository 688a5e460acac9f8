//! Core error types and traits for DocChat

use thiserror::Error;

/// Result type alias for DocChat operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Unified error trait that all DocChat errors implement.
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Get optional context about the error
    fn context(&self) -> Option<&str> {
        None
    }

    /// Check if resubmitting the same action might succeed
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Main error type for DocChat
#[derive(Error, Debug, Clone)]
pub enum ChatError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Transport-level HTTP failures (connect, timeout, unreadable body)
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
        context: Option<String>,
    },

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Backend {
        message: String,
        endpoint: Option<String>,
        status_code: Option<u16>,
    },

    /// Input rejected before any request is made
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// Session persistence errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        context: Option<String>,
    },

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}
