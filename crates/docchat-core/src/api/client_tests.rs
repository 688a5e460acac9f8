//! Integration tests for the backend client with a mock server

#[cfg(test)]
mod tests {
    use crate::api::{BackendClient, ChatBackend, ChatRequest, IngestFile};
    use crate::error::{ChatError, UnifiedError};
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(base_url: &str) -> BackendClient {
        let http_client = Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        BackendClient::with_client(base_url, http_client)
    }

    #[tokio::test]
    async fn test_ingest_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ingest"))
            .and(query_param("chunk_size", "256"))
            .and(body_string_contains("filename=\"a.txt\""))
            .and(body_string_contains("filename=\"b.pdf\""))
            .and(body_string_contains("name=\"chunk_size\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Successfully ingested 2 file(s)",
                "chunks_created": 7
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let files = vec![
            IngestFile::new("a.txt", "alpha"),
            IngestFile::new("b.pdf", b"%PDF-1.4".to_vec()),
        ];

        let response = client.ingest(files, 256).await.unwrap();
        assert_eq!(response.message, "Successfully ingested 2 file(s)");
        assert_eq!(response.chunks_created, Some(7));
    }

    #[tokio::test]
    async fn test_ingest_error_uses_detail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ingest"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "detail": "Unsupported file type. Please upload PDF, TXT, or DOCX."
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client
            .ingest(vec![IngestFile::new("x.txt", "x")], 256)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unsupported file type. Please upload PDF, TXT, or DOCX."
        );
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_ingest_error_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ingest"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client
            .ingest(vec![IngestFile::new("x.txt", "x")], 256)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error uploading file (status 502)");
    }

    #[tokio::test]
    async fn test_chat_success() {
        let mock_server = MockServer::start().await;
        let history = format!("Q: What is it?\nA: A report.\n{}\n", "-".repeat(100));

        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({"session_id": "k3j9x0ab", "message": "What is it?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "question": "What is it?",
                "answer": "A report.",
                "history": history
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let response = client
            .chat(ChatRequest::new("k3j9x0ab", "What is it?"))
            .await
            .unwrap();

        assert_eq!(response.history, history);
        assert_eq!(response.answer.as_deref(), Some("A report."));
    }

    #[tokio::test]
    async fn test_chat_sends_temperature() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(
                json!({"session_id": "s", "message": "m", "temperature": 0.25}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"history": "h"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let request = ChatRequest::new("s", "m").with_temperature(Some(0.25));
        assert_eq!(client.chat(request).await.unwrap().history, "h");
    }

    #[tokio::test]
    async fn test_chat_no_documents() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "No documents ingested yet. Please upload a document first."
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.chat(ChatRequest::new("s", "hi")).await.unwrap_err();

        match &err {
            ChatError::Backend {
                message,
                status_code,
                ..
            } => {
                assert!(message.starts_with("No documents ingested yet"));
                assert_eq!(*status_code, Some(400));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_chat_malformed_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "no history"})))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.chat(ChatRequest::new("s", "hi")).await.unwrap_err();
        assert_eq!(err.error_code(), "DOCCHAT_JSON");
    }

    #[tokio::test]
    async fn test_clear_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/clear"))
            .and(query_param("session_id", "abc123de"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Chat history cleared for session 'abc123de'."
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let response = client.clear("abc123de").await.unwrap();
        assert_eq!(
            response.summary(),
            "Chat history cleared for session 'abc123de'."
        );
    }

    #[tokio::test]
    async fn test_clear_unknown_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/clear"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "No history found for this session."
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.clear("nope").await.unwrap_err();
        assert_eq!(err.to_string(), "No history found for this session.");
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        // Port 9 (discard) is closed on test machines
        let client = create_test_client("http://127.0.0.1:9");
        let err = client.clear("s").await.unwrap_err();
        assert!(matches!(err, ChatError::Http { .. }));
    }
}
