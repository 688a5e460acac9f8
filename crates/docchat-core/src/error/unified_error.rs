//! UnifiedError trait implementation for ChatError

use super::types::{ChatError, UnifiedError};

impl UnifiedError for ChatError {
    fn error_code(&self) -> &str {
        match self {
            Self::Config { .. } => "DOCCHAT_CONFIG",
            Self::Http { .. } => "DOCCHAT_HTTP",
            Self::Backend { .. } => "DOCCHAT_BACKEND",
            Self::InvalidInput { .. } => "DOCCHAT_INVALID_INPUT",
            Self::Io { .. } => "DOCCHAT_IO",
            Self::Json { .. } => "DOCCHAT_JSON",
            Self::Storage { .. } => "DOCCHAT_STORAGE",
            Self::Other { .. } => "DOCCHAT_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Config { message, .. } => message,
            Self::Http { message, .. } => message,
            Self::Backend { message, .. } => message,
            Self::InvalidInput { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Json { message, .. } => message,
            Self::Storage { message, .. } => message,
            Self::Other { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            Self::Http { context, .. } => context.as_deref(),
            Self::Backend { endpoint, .. } => endpoint.as_deref(),
            Self::InvalidInput { context, .. } => context.as_deref(),
            Self::Io { context, .. } => context.as_deref(),
            Self::Json { context, .. } => context.as_deref(),
            Self::Storage { context, .. } => context.as_deref(),
            Self::Other { context, .. } => context.as_deref(),
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::Backend { status_code, .. } => matches!(status_code, Some(code) if *code >= 500),
            _ => false,
        }
    }
}
