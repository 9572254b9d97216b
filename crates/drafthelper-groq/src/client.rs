// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI-compatible chat completions endpoint.
//!
//! One request per call. There is no retry loop: a failed generation is
//! reported to the caller as-is.

use std::time::Duration;

use drafthelper_core::DraftHelperError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// HTTP client holding the bearer credential and connection pool.
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
}

impl GroqClient {
    /// Creates a client for `base_url` (e.g. `https://api.groq.com/openai/v1`).
    pub fn new(
        api_key: SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, DraftHelperError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| DraftHelperError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| DraftHelperError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends one completion request and decodes the response body.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, DraftHelperError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| DraftHelperError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "completion response received");

        let body = response.text().await.map_err(|e| DraftHelperError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "provider returned {status} ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown_error"),
                    api_err.error.message
                ),
                Err(_) => format!("provider returned {status}: {body}"),
            };
            return Err(DraftHelperError::provider(message));
        }

        serde_json::from_str(&body).map_err(|e| DraftHelperError::Provider {
            message: format!("failed to parse provider response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GroqClient {
        GroqClient::new(
            SecretString::from("gsk_test".to_string()),
            base_url,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn test_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "llama-3.3-70b-versatile".into(),
            messages: vec![ChatMessage::system("system"), ChatMessage::user("Hello")],
        }
    }

    fn success_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "model": "llama-3.3-70b-versatile",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn chat_completion_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Hi there!")))
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .chat_completion(&test_request())
            .await
            .unwrap();

        assert_eq!(result.id.as_deref(), Some("chatcmpl-test"));
        assert_eq!(result.choices[0].message.content.as_deref(), Some("Hi there!"));
    }

    #[tokio::test]
    async fn client_sends_bearer_auth_and_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer gsk_test"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama-3.3-70b-versatile",
                "messages": [
                    {"role": "system", "content": "system"},
                    {"role": "user", "content": "Hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).chat_completion(&test_request()).await;
        assert!(result.is_ok(), "request should match: {result:?}");
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let client = test_client("http://localhost:1234/v1/");
        assert_eq!(client.endpoint(), "http://localhost:1234/v1/chat/completions");
    }

    #[tokio::test]
    async fn error_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"message": "Rate limit reached", "type": "tokens", "code": "rate_limit_exceeded"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .chat_completion(&test_request())
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("429"), "got: {err}");
        assert!(err.contains("Rate limit reached"), "got: {err}");
    }

    #[tokio::test]
    async fn unstructured_error_body_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .chat_completion(&test_request())
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("502"), "got: {err}");
        assert!(err.contains("bad gateway"), "got: {err}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).chat_completion(&test_request()).await;
        assert!(matches!(result, Err(DraftHelperError::Provider { .. })));
    }

    #[tokio::test]
    async fn connection_failure_is_a_provider_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let client = test_client("http://127.0.0.1:9");
        let result = client.chat_completion(&test_request()).await;
        match result {
            Err(DraftHelperError::Provider { message, source }) => {
                assert!(message.contains("HTTP request failed"));
                assert!(source.is_some());
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }
}
