//! HTTP client for the retrieval/chat backend

use super::types::{ChatRequest, ChatResponse, ClearResponse, IngestFile, IngestResponse};
use crate::config::BackendConfig;
use crate::error::{ChatError, ChatResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

/// The three backend calls the client relies on
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Upload documents for chunking and indexing
    async fn ingest(&self, files: Vec<IngestFile>, chunk_size: u32) -> ChatResult<IngestResponse>;

    /// Send a message and receive the session's full transcript
    async fn chat(&self, request: ChatRequest) -> ChatResult<ChatResponse>;

    /// Clear the backend-side transcript of a session
    async fn clear(&self, session_id: &str) -> ChatResult<ClearResponse>;
}

/// reqwest-backed backend client
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http_client: Client,
}

impl BackendClient {
    /// Create a client with timeouts from configuration
    pub fn new(config: &BackendConfig) -> ChatResult<Self> {
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                ChatError::config_with_context(
                    format!("Failed to build HTTP client: {}", e),
                    "Creating backend client",
                )
            })?;

        Ok(Self::with_client(&config.base_url, http_client))
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(base_url: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ChatBackend for BackendClient {
    #[instrument(skip(self, files), fields(files = files.len()), level = "debug")]
    async fn ingest(&self, files: Vec<IngestFile>, chunk_size: u32) -> ChatResult<IngestResponse> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.content).file_name(file.name);
            form = form.part("files", part);
        }
        form = form.text("chunk_size", chunk_size.to_string());

        // The backend reads chunk_size from the query string; the form field
        // is kept for servers that read it from the body.
        let response = self
            .http_client
            .post(self.url("/ingest"))
            .query(&[("chunk_size", chunk_size)])
            .multipart(form)
            .send()
            .await?;

        let result: IngestResponse =
            parse_response(response, "/ingest", &["detail", "error"], "Error uploading file")
                .await?;
        debug!(
            "Ingest finished: {} ({:?} chunks)",
            result.message, result.chunks_created
        );
        Ok(result)
    }

    #[instrument(skip(self, request), fields(session_id = %request.session_id), level = "debug")]
    async fn chat(&self, request: ChatRequest) -> ChatResult<ChatResponse> {
        let response = self
            .http_client
            .post(self.url("/chat"))
            .json(&request)
            .send()
            .await?;

        parse_response(response, "/chat", &["error"], "Error sending message").await
    }

    #[instrument(skip(self), level = "debug")]
    async fn clear(&self, session_id: &str) -> ChatResult<ClearResponse> {
        let response = self
            .http_client
            .post(self.url("/clear"))
            .query(&[("session_id", session_id)])
            .send()
            .await?;

        parse_response(response, "/clear", &["message"], "Error clearing history").await
    }
}

/// Decode a success body, or turn an error body into a backend error
async fn parse_response<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
    error_keys: &[&str],
    fallback: &str,
) -> ChatResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = error_message(&body, error_keys)
            .unwrap_or_else(|| format!("{} (status {})", fallback, status.as_u16()));
        debug!("{} failed with status {}: {}", endpoint, status, message);
        return Err(ChatError::backend(message, endpoint, Some(status.as_u16())));
    }

    serde_json::from_str(&body).map_err(|e| ChatError::Json {
        message: format!("Unexpected response from {}: {}", endpoint, e),
        context: Some(truncate(&body, 200)),
    })
}

/// First non-empty error field found in a JSON error body
fn error_message(body: &str, keys: &[&str]) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    keys.iter().find_map(|key| match json.get(*key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_key_priority() {
        let body = r#"{"error": "second", "detail": "first"}"#;
        assert_eq!(
            error_message(body, &["detail", "error"]).as_deref(),
            Some("first")
        );
        assert_eq!(error_message(body, &["error"]).as_deref(), Some("second"));
    }

    #[test]
    fn test_error_message_non_string_detail() {
        let body = r#"{"detail": [{"loc": ["body", "files"], "msg": "field required"}]}"#;
        let message = error_message(body, &["detail"]).unwrap();
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_error_message_missing() {
        assert!(error_message("<html>502</html>", &["error"]).is_none());
        assert!(error_message(r#"{"error": ""}"#, &["error"]).is_none());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = BackendClient::with_client("http://localhost:8000/", Client::new());
        assert_eq!(client.url("/chat"), "http://localhost:8000/chat");
    }
}
