//! Anthropic adapter — `POST {api_base}/messages`.
//!
//! The Messages API only accepts `user` and `assistant` turns here, so system
//! instructions are folded into the first user turn (see [`convert_messages`]).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use llm_router_core::config::ProviderSettings;
use llm_router_core::validation::validate_request;
use llm_router_core::{ChatResponse, Message, Parameters, Role, RouterError, Usage};

use crate::http_client::{endpoint, HttpVendorClient};
use crate::traits::{ChatProvider, VendorClient};

pub const NAME: &str = "anthropic";
pub const DISPLAY_NAME: &str = "Anthropic";
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com/v1";
pub const API_VERSION: &str = "2023-06-01";

/// Sent when the caller gives no `max_tokens`; the API requires one.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Separator between merged system texts and the user turn they precede.
const SYSTEM_SEPARATOR: &str = "\n\n";

/// Parameters forwarded to `/messages`.
pub const ALLOWED_PARAMETERS: &[&str] = &[
    "max_tokens",
    "metadata",
    "stop_sequences",
    "temperature",
    "top_k",
    "top_p",
];

const USAGE_KEYS: &[&str] = &["input_tokens", "output_tokens"];

// ─────────────────────────────────────────────
// Native request
// ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnthropicRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnthropicMessage {
    pub role: AnthropicRole,
    pub content: String,
}

impl AnthropicMessage {
    pub fn user(content: impl Into<String>) -> Self {
        AnthropicMessage {
            role: AnthropicRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        AnthropicMessage {
            role: AnthropicRole::Assistant,
            content: content.into(),
        }
    }
}

/// Native request body for `/messages`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub max_tokens: Value,
    pub messages: Vec<AnthropicMessage>,
    #[serde(flatten)]
    pub parameters: Parameters,
}

impl AnthropicRequest {
    /// `max_tokens` is lifted out of `parameters` so it is never serialized twice.
    pub fn new(model: &str, messages: &[Message], parameters: &Parameters) -> Self {
        let mut parameters = parameters.clone();
        let max_tokens = parameters
            .remove("max_tokens")
            .unwrap_or_else(|| Value::from(DEFAULT_MAX_TOKENS));

        AnthropicRequest {
            model: model.to_string(),
            max_tokens,
            messages: convert_messages(messages),
            parameters,
        }
    }
}

/// Fold system messages into the conversation.
///
/// All system contents are joined (in order) with a blank line. The result
/// is prepended, followed by a blank line, to the first user message; when
/// there is no user message a new leading user message carries it instead.
/// Every other message keeps its content and relative order.
pub fn convert_messages(messages: &[Message]) -> Vec<AnthropicMessage> {
    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect();

    let mut converted: Vec<AnthropicMessage> = messages
        .iter()
        .filter_map(|m| match m.role {
            Role::System => None,
            Role::User => Some(AnthropicMessage::user(m.content.clone())),
            Role::Assistant => Some(AnthropicMessage::assistant(m.content.clone())),
        })
        .collect();

    if system.is_empty() {
        return converted;
    }

    let system_text = system.join(SYSTEM_SEPARATOR);
    match converted.iter_mut().find(|m| m.role == AnthropicRole::User) {
        Some(first_user) => {
            first_user.content = format!("{system_text}{SYSTEM_SEPARATOR}{}", first_user.content);
        }
        None => converted.insert(0, AnthropicMessage::user(system_text)),
    }
    converted
}

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

pub struct AnthropicProvider {
    client: Arc<dyn VendorClient<AnthropicRequest>>,
}

impl AnthropicProvider {
    /// Create a provider talking to the Anthropic HTTP API.
    pub fn new(api_key: &str, settings: &ProviderSettings) -> Result<Self, RouterError> {
        let client = HttpVendorClient::new(
            messages_url(settings),
            &[("x-api-key", api_key), ("anthropic-version", API_VERSION)],
            settings,
        )
        .map_err(|e| RouterError::backend(NAME, DISPLAY_NAME, e))?;

        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create a provider over any vendor client (tests, proxies, SDK shims).
    pub fn with_client(client: Arc<dyn VendorClient<AnthropicRequest>>) -> Self {
        AnthropicProvider { client }
    }
}

/// `{api_base}/messages`; the base carries the API version segment.
pub fn messages_url(settings: &ProviderSettings) -> String {
    endpoint(
        settings.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
        "messages",
    )
}

/// Registry factory.
pub fn build(api_key: &str, settings: &ProviderSettings) -> Result<Box<dyn ChatProvider>, RouterError> {
    Ok(Box::new(AnthropicProvider::new(api_key, settings)?))
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    async fn chat(
        &self,
        model: &str,
        messages: &[Message],
        parameters: &Parameters,
    ) -> Result<ChatResponse, RouterError> {
        validate_request(model, messages, parameters, ALLOWED_PARAMETERS)?;

        let request = AnthropicRequest::new(model, messages, parameters);

        debug!(
            provider = NAME,
            model = %model,
            messages = messages.len(),
            native_messages = request.messages.len(),
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

/// Concatenate every `text` content block; read input/output token counts.
fn normalize_response(model: &str, raw: Value) -> ChatResponse {
    let content = raw
        .get("content")
        .and_then(Value::as_array)
        .map(|blocks| {
            blocks
                .iter()
                .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|b| b.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default();
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
