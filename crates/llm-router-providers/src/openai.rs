//! OpenAI adapter — `POST {api_base}/chat/completions`.
//!
//! OpenAI understands the system/user/assistant triplet natively, so
//! messages pass through unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use llm_router_core::config::ProviderSettings;
use llm_router_core::validation::validate_request;
use llm_router_core::{ChatResponse, Message, Parameters, RouterError, Usage};

use crate::http_client::{endpoint, HttpVendorClient};
use crate::traits::{ChatProvider, VendorClient};

pub const NAME: &str = "openai";
pub const DISPLAY_NAME: &str = "OpenAI";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Parameters forwarded to `/chat/completions`.
pub const ALLOWED_PARAMETERS: &[&str] = &[
    "frequency_penalty",
    "logit_bias",
    "logprobs",
    "max_completion_tokens",
    "max_tokens",
    "n",
    "presence_penalty",
    "response_format",
    "seed",
    "stop",
    "temperature",
    "top_logprobs",
    "top_p",
    "user",
];

const USAGE_KEYS: &[&str] = &["prompt_tokens", "completion_tokens", "total_tokens"];

/// Native request body for `/chat/completions`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(flatten)]
    pub parameters: Parameters,
}

impl OpenAiRequest {
    pub fn new(model: &str, messages: &[Message], parameters: &Parameters) -> Self {
        OpenAiRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            parameters: parameters.clone(),
        }
    }
}

pub struct OpenAiProvider {
    client: Arc<dyn VendorClient<OpenAiRequest>>,
}

impl OpenAiProvider {
    /// Create a provider talking to the OpenAI HTTP API.
    pub fn new(api_key: &str, settings: &ProviderSettings) -> Result<Self, RouterError> {
        let bearer = format!("Bearer {api_key}");
        let client = HttpVendorClient::new(
            completions_url(settings),
            &[("Authorization", bearer.as_str())],
            settings,
        )
        .map_err(|e| RouterError::backend(NAME, DISPLAY_NAME, e))?;

        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create a provider over any vendor client (tests, proxies, SDK shims).
    pub fn with_client(client: Arc<dyn VendorClient<OpenAiRequest>>) -> Self {
        OpenAiProvider { client }
    }
}

/// `{api_base}/chat/completions`; the base carries the API version segment.
pub fn completions_url(settings: &ProviderSettings) -> String {
    endpoint(
        settings.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
        "chat/completions",
    )
}

/// Registry factory.
pub fn build(api_key: &str, settings: &ProviderSettings) -> Result<Box<dyn ChatProvider>, RouterError> {
    Ok(Box::new(OpenAiProvider::new(api_key, settings)?))
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn chat(
        &self,
        model: &str,
        messages: &[Message],
        parameters: &Parameters,
    ) -> Result<ChatResponse, RouterError> {
        validate_request(model, messages, parameters, ALLOWED_PARAMETERS)?;

        let request = OpenAiRequest::new(model, messages, parameters);

        debug!(
            provider = NAME,
            model = %model,
            messages = messages.len(),
            parameters = parameters.len(),
            "Calling LLM"
        );

        let raw = self.client.send(&request).await.map_err(|e| {
            error!(provider = NAME, model = %model, error = %e, "LLM call failed");
            RouterError::backend(NAME, DISPLAY_NAME, e)
        })?;

        let response = normalize_response(model, raw);
        debug!(
            provider = NAME,
            content_len = response.content.len(),
            usage = %response.usage,
            "LLM response received"
        );
        Ok(response)
    }

    fn name(&self) -> &str {
        NAME
    }

    fn allowed_parameters(&self) -> &'static [&'static str] {
        ALLOWED_PARAMETERS
    }
}

/// First choice's message content, plus the three usage counters.
fn normalize_response(model: &str, raw: Value) -> ChatResponse {
    let content = raw
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let usage = Usage::from_fields(raw.get("usage"), USAGE_KEYS);

    ChatResponse {
        provider: NAME.to_string(),
        model: model.to_string(),
        content,
        usage,
        raw,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubClient;
    use serde_json::json;

    fn completion(content: Value, usage: Value) -> Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": usage
        })
    }

    fn provider_with(stub: &Arc<StubClient<OpenAiRequest>>) -> OpenAiProvider {
        OpenAiProvider::with_client(stub.clone())
    }

    #[tokio::test]
    async fn test_chat_passes_messages_through() {
        let stub: Arc<StubClient<OpenAiRequest>> = Arc::new(StubClient::ok(completion(
            json!("hello"),
            json!({"prompt_tokens": 5, "completion_tokens": 1, "total_tokens": 6}),
        )));
        let provider = provider_with(&stub);

        let messages = vec![
            Message::system("Be terse."),
            Message::user("hi"),
            Message::assistant("hey"),
            Message::user("again"),
        ];
        let mut params = Parameters::new();
        params.insert("temperature".into(), json!(0.7));

        let resp = provider.chat("gpt-3.5-turbo", &messages, &params).await.unwrap();

        let sent = stub.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].model, "gpt-3.5-turbo");
        assert_eq!(sent[0].messages, messages);
        assert_eq!(sent[0].parameters.get("temperature"), Some(&json!(0.7)));

        assert_eq!(resp.provider, "openai");
        assert_eq!(resp.model, "gpt-3.5-turbo");
        assert_eq!(resp.content, "hello");
        assert_eq!(resp.usage.get("prompt_tokens"), Some(5));
        assert_eq!(resp.usage.get("completion_tokens"), Some(1));
        assert_eq!(resp.usage.get("total_tokens"), Some(6));
        assert_eq!(resp.raw["id"], "chatcmpl-test");
    }

    #[test]
    fn test_request_serializes_parameters_flat() {
        let mut params = Parameters::new();
        params.insert("max_tokens".into(), json!(50));
        let request = OpenAiRequest::new("gpt-4o", &[Message::user("hi")], &params);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "hi"}],
                "max_tokens": 50
            })
        );
    }

    #[tokio::test]
    async fn test_no_choices_gives_empty_content() {
        let stub: Arc<StubClient<OpenAiRequest>> = Arc::new(StubClient::ok(json!({"id": "x", "choices": []})));
        let provider = provider_with(&stub);

        let resp = provider
            .chat("gpt-4o", &[Message::user("hi")], &Parameters::new())
            .await
            .unwrap();

        assert_eq!(resp.content, "");
        assert_eq!(resp.usage.get("total_tokens"), None);
        assert!(resp.usage.contains("total_tokens"));
    }

    #[tokio::test]
    async fn test_null_content_gives_empty_string() {
        let stub: Arc<StubClient<OpenAiRequest>> = Arc::new(StubClient::ok(completion(
            Value::Null,
            json!({"prompt_tokens": 3}),
        )));
        let provider = provider_with(&stub);

        let resp = provider
            .chat("gpt-4o", &[Message::user("hi")], &Parameters::new())
            .await
            .unwrap();

        assert_eq!(resp.content, "");
        assert_eq!(resp.usage.get("prompt_tokens"), Some(3));
        assert_eq!(resp.usage.get("completion_tokens"), None);
    }

    #[tokio::test]
    async fn test_unknown_parameter_skips_vendor_call() {
        let stub: Arc<StubClient<OpenAiRequest>> = Arc::new(StubClient::ok(completion(json!("x"), json!({}))));
        let provider = provider_with(&stub);

        let mut params = Parameters::new();
        params.insert("top_k".into(), json!(40));

        let err = provider
            .chat("gpt-4o", &[Message::user("hi")], &params)
            .await
            .unwrap_err();

        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("top_k"));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_messages_rejected() {
        let stub: Arc<StubClient<OpenAiRequest>> = Arc::new(StubClient::ok(completion(json!("x"), json!({}))));
        let provider = provider_with(&stub);

        let err = provider.chat("gpt-4o", &[], &Parameters::new()).await.unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_model_rejected() {
        let stub: Arc<StubClient<OpenAiRequest>> = Arc::new(StubClient::ok(completion(json!("x"), json!({}))));
        let provider = provider_with(&stub);

        let err = provider
            .chat("", &[Message::user("hi")], &Parameters::new())
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_vendor_failure_is_normalized() {
        let stub: Arc<StubClient<OpenAiRequest>> = Arc::new(StubClient::failing(429, "Rate limit exceeded"));
        let provider = provider_with(&stub);

        let err = provider
            .chat("gpt-4o", &[Message::user("hi")], &Parameters::new())
            .await
            .unwrap_err();

        match &err {
            RouterError::BackendCallFailed { provider, message, .. } => {
                assert_eq!(provider, "openai");
                assert!(message.starts_with("OpenAI API error"));
                assert!(message.contains("429"));
                assert!(message.contains("Rate limit exceeded"));
            }
            other => panic!("Expected BackendCallFailed, got {other:?}"),
        }
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn test_completions_url() {
        assert_eq!(
            completions_url(&ProviderSettings::default()),
            "https://api.openai.com/v1/chat/completions"
        );
        let proxy = ProviderSettings {
            api_base: Some("http://proxy.local/v1/".into()),
            ..Default::default()
        };
        assert_eq!(completions_url(&proxy), "http://proxy.local/v1/chat/completions");
    }

    #[test]
    fn test_implementation_name() {
        let stub: Arc<StubClient<OpenAiRequest>> = Arc::new(StubClient::ok(json!({})));
        let provider = provider_with(&stub);
        assert!(provider.implementation().ends_with("OpenAiProvider"));
        assert_eq!(provider.name(), "openai");
        assert!(provider.allowed_parameters().contains(&"temperature"));
    }
}
