//! From trait implementations for ChatError conversions

use super::types::ChatError;
use docchat_session::StorageError;

impl From<anyhow::Error> for ChatError {
    fn from(error: anyhow::Error) -> Self {
        Self::other(error.to_string())
    }
}

impl From<std::io::Error> for ChatError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        let context = if error.is_timeout() {
            Some("Request timed out".to_string())
        } else if error.is_connect() {
            Some("Could not connect to the backend".to_string())
        } else {
            None
        };
        Self::Http {
            message: error.to_string(),
            url,
            status_code,
            context,
        }
    }
}

impl From<StorageError> for ChatError {
    fn from(error: StorageError) -> Self {
        Self::Storage {
            message: error.to_string(),
            context: Some("Persisting sessions".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnifiedError;

    #[test]
    fn test_storage_conversion() {
        let err: ChatError = StorageError::InvalidData("bad".to_string()).into();
        assert_eq!(err.error_code(), "DOCCHAT_STORAGE");
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_io_conversion() {
        let err: ChatError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing file").into();
        assert!(matches!(err, ChatError::Io { .. }));
        assert!(!err.is_retryable());
    }
}
