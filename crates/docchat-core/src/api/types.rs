//! Wire types for the retrieval/chat backend

use serde::{Deserialize, Serialize};

/// A document ready to be sent to `/ingest`
#[derive(Debug, Clone)]
pub struct IngestFile {
    /// File name reported to the backend (it picks the loader by extension)
    pub name: String,
    /// Raw file content
    pub content: Vec<u8>,
}

impl IngestFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Successful `/ingest` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IngestResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub chunks_created: Option<usize>,
}

/// `/chat` request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Successful `/chat` response
///
/// `history` is the full transcript for the session, newest exchange first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub history: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

/// Successful `/clear` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClearResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ClearResponse {
    /// Human-readable outcome, whichever field the backend filled in
    pub fn summary(&self) -> &str {
        self.status
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("History cleared")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_omits_unset_temperature() {
        let body = serde_json::to_value(ChatRequest::new("abc", "hi")).unwrap();
        assert_eq!(body, json!({"session_id": "abc", "message": "hi"}));

        let body =
            serde_json::to_value(ChatRequest::new("abc", "hi").with_temperature(Some(0.5))).unwrap();
        assert_eq!(body["temperature"], json!(0.5));
    }

    #[test]
    fn test_clear_summary() {
        let resp: ClearResponse =
            serde_json::from_value(json!({"message": "Chat history cleared"})).unwrap();
        assert_eq!(resp.summary(), "Chat history cleared");
        assert_eq!(ClearResponse::default().summary(), "History cleared");
    }
}
