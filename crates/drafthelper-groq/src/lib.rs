// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groq completion adapter.
//!
//! Implements [`CompletionAdapter`] against Groq's OpenAI-compatible chat
//! completions API. Any server speaking the same protocol works by pointing
//! `provider.base_url` at it.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use drafthelper_config::DraftHelperConfig;
use drafthelper_core::{
    AdapterType, CompletionAdapter, CompletionRequest, CompletionResponse, DraftHelperError,
    HealthStatus, PluginAdapter,
};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::GroqClient;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Completion provider backed by [`GroqClient`].
pub struct GroqProvider {
    client: GroqClient,
}

impl GroqProvider {
    /// Creates the provider from configuration.
    ///
    /// The credential comes from `provider.api_key` or `GROQ_API_KEY`; a
    /// missing credential is a configuration error.
    pub fn new(config: &DraftHelperConfig) -> Result<Self, DraftHelperError> {
        let api_key = drafthelper_config::resolve_api_key(config)
            .map_err(|e| DraftHelperError::Config(e.to_string()))?;
        let client = GroqClient::new(
            SecretString::from(api_key),
            &config.provider.base_url,
            Duration::from_secs(config.provider.timeout_secs),
        )?;

        info!(
            base_url = %config.provider.base_url,
            model = %config.provider.model,
            "completion provider initialized"
        );
        Ok(Self { client })
    }

    /// Creates a provider around an existing client.
    pub fn with_client(client: GroqClient) -> Self {
        Self { client }
    }
}

/// Pulls the first choice's text out of a response.
///
/// A response with no choices, null content, or only whitespace carries no
/// usable draft and is rejected.
fn first_choice_text(
    response: ChatCompletionResponse,
) -> Result<CompletionResponse, DraftHelperError> {
    let model = response.model;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DraftHelperError::provider("provider returned no choices"))?;

    let content = choice
        .message
        .content
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| DraftHelperError::provider("provider returned an empty completion"))?;

    Ok(CompletionResponse {
        content,
        model,
        finish_reason: choice.finish_reason,
    })
}

#[async_trait]
impl PluginAdapter for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, DraftHelperError> {
        // No probe call: it would spend tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), DraftHelperError> {
        debug!("completion provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl CompletionAdapter for GroqProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, DraftHelperError> {
        if request.system_instruction.trim().is_empty() {
            return Err(DraftHelperError::provider("system instruction must not be empty"));
        }
        if request.user_prompt.trim().is_empty() {
            return Err(DraftHelperError::provider("prompt must not be empty"));
        }

        let api_request = ChatCompletionRequest {
            model: request.model,
            messages: vec![
                ChatMessage::system(request.system_instruction),
                ChatMessage::user(request.user_prompt),
            ],
        };

        let response = self.client.chat_completion(&api_request).await?;
        let completion = first_choice_text(response)?;
        debug!(
            model = %completion.model,
            finish_reason = ?completion.finish_reason,
            chars = completion.content.chars().count(),
            "completion received"
        );
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> GroqProvider {
        let client = GroqClient::new(
            SecretString::from("gsk_test".to_string()),
            &server.uri(),
            Duration::from_secs(5),
        )
        .unwrap();
        GroqProvider::with_client(client)
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "llama-3.3-70b-versatile".into(),
            system_instruction: "Ты профессиональный помощник. Пиши на русском языке.".into(),
            user_prompt: "Напиши письмо".into(),
        }
    }

    async fn mount_body(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    #[serial]
    fn missing_credential_is_a_config_error() {
        let previous = std::env::var(drafthelper_config::FALLBACK_API_KEY_ENV).ok();
        // SAFETY: every test touching the environment is serialized.
        unsafe { std::env::remove_var(drafthelper_config::FALLBACK_API_KEY_ENV) };

        let mut config = DraftHelperConfig::default();
        config.provider.api_key = Some("   ".into());
        let result = GroqProvider::new(&config);

        if let Some(value) = previous {
            unsafe { std::env::set_var(drafthelper_config::FALLBACK_API_KEY_ENV, value) };
        }
        match result {
            Err(DraftHelperError::Config(message)) => {
                assert!(message.contains("provider.api_key"), "got: {message}")
            }
            Err(other) => panic!("expected a config error, got {other}"),
            Ok(_) => panic!("provider built without a credential"),
        }
    }

    #[test]
    #[serial]
    fn configured_credential_builds_provider() {
        let mut config = DraftHelperConfig::default();
        config.provider.api_key = Some("gsk_configured".into());
        let provider = GroqProvider::new(&config).unwrap();
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
    }

    #[tokio::test]
    async fn complete_returns_first_choice() {
        let server = MockServer::start().await;
        mount_body(
            &server,
            serde_json::json!({
                "model": "llama-3.3-70b-versatile",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "Уважаемый коллега, отчет готов."}, "finish_reason": "stop"},
                    {"index": 1, "message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
                ]
            }),
        )
        .await;

        let completion = provider_for(&server).complete(request()).await.unwrap();
        assert_eq!(completion.content, "Уважаемый коллега, отчет готов.");
        assert_eq!(completion.model, "llama-3.3-70b-versatile");
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn no_choices_is_rejected() {
        let server = MockServer::start().await;
        mount_body(&server, serde_json::json!({"model": "m", "choices": []})).await;

        let err = provider_for(&server).complete(request()).await.unwrap_err();
        assert!(err.to_string().contains("no choices"), "got: {err}");
    }

    #[tokio::test]
    async fn blank_completion_is_rejected() {
        let server = MockServer::start().await;
        mount_body(
            &server,
            serde_json::json!({
                "model": "m",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "  \n"}}]
            }),
        )
        .await;

        let err = provider_for(&server).complete(request()).await.unwrap_err();
        assert!(err.to_string().contains("empty completion"), "got: {err}");
    }

    #[tokio::test]
    async fn empty_prompt_never_reaches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut req = request();
        req.user_prompt = " ".into();
        let result = provider_for(&server).complete(req).await;
        assert!(matches!(result, Err(DraftHelperError::Provider { .. })));
    }
}
