//! Integration with the OpenAI chat completion API.
//!
//! The scribe sends exactly one user message per run. Quota and rate-limit refusals are
//! surfaced as `Generation::QuotaExceeded` rather than errors.

use std::{sync::Arc, time::Duration};

use async_openai::{
    Client,
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessage, ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs},
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::base::{
    config::Config,
    types::{Generation, Res},
};

use super::{GenericLlmClient, LlmClient};

/// API error types and codes that mean "out of quota" rather than "broken request".
const QUOTA_ERROR_KINDS: [&str; 3] = ["insufficient_quota", "rate_limit_exceeded", "billing_hard_limit_reached"];

// Extra methods on `LlmClient` applied by the openai implementation.

impl LlmClient {
    pub fn openai(config: &Config) -> Self {
        let client = OpenAiLlmClient::new(config);
        Self { inner: Arc::new(client) }
    }
}

// Specific implementations.

/// OpenAI LLM client implementation.
#[derive(Clone)]
pub struct OpenAiLlmClient {
    client: Client<OpenAIConfig>,
    config: Config,
}

impl OpenAiLlmClient {
    /// Create a new OpenAI LLM client.
    #[instrument(name = "OpenAiLlmClient::new", skip_all)]
    pub fn new(config: &Config) -> Self {
        let mut cfg = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());

        if let Some(api_base) = &config.openai_api_base {
            cfg = cfg.with_api_base(api_base.trim_end_matches('/'));
        }

        // Surface 429s immediately so they reach `is_quota_error`.
        let backoff = ExponentialBackoffBuilder::new().with_max_elapsed_time(Some(Duration::ZERO)).build();

        Self {
            client: Client::with_config(cfg).with_backoff(backoff),
            config: config.clone(),
        }
    }
}

#[async_trait]
impl GenericLlmClient for OpenAiLlmClient {
    #[instrument(name = "OpenAiLlmClient::complete", skip_all)]
    async fn complete(&self, prompt: &str) -> Res<Generation> {
        debug!("Requesting completion from `{}` ...", self.config.openai_model);

        let messages = vec![ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
            name: None,
        })];

        let mut request = CreateChatCompletionRequestArgs::default();
        request
            .model(&self.config.openai_model)
            .max_completion_tokens(self.config.openai_max_tokens)
            .messages(messages);

        // Add the temperature for the non-reasoning models.
        if self.config.openai_model.starts_with("gpt") {
            request.temperature(self.config.openai_temperature);
        }

        let request = request.build()?;
        let result = timeout(Duration::from_secs(self.config.openai_timeout_secs), self.client.chat().create(request)).await;

        let response = match result {
            Ok(Ok(response)) => response,
            Ok(Err(OpenAIError::ApiError(err))) if is_quota_error(&err) => {
                warn!("OpenAI refused the call for quota reasons: {}", err.message);
                return Ok(Generation::QuotaExceeded { message: err.message });
            }
            Ok(Err(err)) => return Err(anyhow::anyhow!("OpenAI API call failed: {err}")),
            Err(_) => return Err(anyhow::anyhow!("OpenAI API call timed out after {}s", self.config.openai_timeout_secs)),
        };

        let content = response.choices.into_iter().next().and_then(|choice| choice.message.content).unwrap_or_default();

        if content.trim().is_empty() {
            return Err(anyhow::anyhow!("OpenAI returned an empty completion."));
        }

        info!("Received completion ({} bytes).", content.len());

        Ok(Generation::Text(content))
    }
}

// Helpers.

/// Whether an API error is a quota, billing, or rate-limit refusal.
fn is_quota_error(err: &ApiError) -> bool {
    [err.r#type.as_deref(), err.code.as_deref()]
        .into_iter()
        .flatten()
        .any(|kind| QUOTA_ERROR_KINDS.contains(&kind))
}

// Tests.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path},
    };

    use super::*;
    use crate::base::config::ConfigInner;

    fn create_test_config(api_base: &str) -> Config {
        Config {
            inner: Arc::new(ConfigInner {
                openai_api_key: "sk-test".to_string(),
                openai_model: "gpt-4o-mini".to_string(),
                openai_max_tokens: 300,
                openai_temperature: 0.3,
                openai_api_base: Some(api_base.to_string()),
                openai_timeout_secs: 10,
                ..Default::default()
            }),
        }
    }

    fn api_error(value: serde_json::Value) -> ApiError {
        serde_json::from_value(value).unwrap()
    }

    fn completion(content: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn quota_errors_are_recognized() {
        assert!(is_quota_error(&api_error(json!({ "message": "m", "type": "insufficient_quota", "param": null, "code": "insufficient_quota" }))));
        assert!(is_quota_error(&api_error(json!({ "message": "m", "type": "requests", "param": null, "code": "rate_limit_exceeded" }))));
        assert!(is_quota_error(&api_error(json!({ "message": "m", "type": null, "param": null, "code": "billing_hard_limit_reached" }))));
    }

    #[test]
    fn other_errors_are_not_quota_errors() {
        assert!(!is_quota_error(&api_error(json!({ "message": "m", "type": "invalid_request_error", "param": null, "code": "invalid_api_key" }))));
        assert!(!is_quota_error(&api_error(json!({ "message": "m", "type": null, "param": null, "code": null }))));
    }

    #[tokio::test]
    async fn complete_sends_single_user_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "max_completion_tokens": 300,
                "messages": [{ "role": "user", "content": "메모를 정리해 주세요" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("  ## 배경\n\n정리된 본문\n"))))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiLlmClient::new(&create_test_config(&server.uri()));
        let generation = client.complete("메모를 정리해 주세요").await.unwrap();

        assert_eq!(generation, Generation::Text("  ## 배경\n\n정리된 본문\n".to_string()));
    }

    #[tokio::test]
    async fn insufficient_quota_maps_to_quota_exceeded() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {
                    "message": "You exceeded your current quota, please check your plan and billing details.",
                    "type": "insufficient_quota",
                    "param": null,
                    "code": "insufficient_quota"
                }
            })))
            .mount(&server)
            .await;

        let client = OpenAiLlmClient::new(&create_test_config(&server.uri()));
        let generation = client.complete("prompt").await.unwrap();

        assert!(matches!(generation, Generation::QuotaExceeded { .. }));
    }

    #[tokio::test]
    async fn rate_limit_maps_to_quota_exceeded_without_retrying() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {
                    "message": "Rate limit reached for gpt-4o-mini on requests per min.",
                    "type": "requests",
                    "param": null,
                    "code": "rate_limit_exceeded"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiLlmClient::new(&create_test_config(&server.uri()));
        let generation = client.complete("prompt").await.unwrap();

        assert!(matches!(generation, Generation::QuotaExceeded { .. }));
    }

    #[tokio::test]
    async fn other_api_errors_propagate() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "message": "Incorrect API key provided.",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "invalid_api_key"
                }
            })))
            .mount(&server)
            .await;

        let client = OpenAiLlmClient::new(&create_test_config(&server.uri()));

        assert!(client.complete("prompt").await.is_err());
    }

    #[tokio::test]
    async fn empty_completion_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!(null))))
            .mount(&server)
            .await;

        let client = OpenAiLlmClient::new(&create_test_config(&server.uri()));

        assert!(client.complete("prompt").await.is_err());
    }
}
