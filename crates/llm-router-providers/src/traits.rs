//! Provider contract — the capability every backend adapter implements —
//! and the vendor client boundary adapters call into.

use async_trait::async_trait;
use llm_router_core::{ChatResponse, Message, Parameters, RouterError};
use thiserror::Error;

/// The uniform chat capability every backend exposes.
///
/// Implementations must validate with [`llm_router_core::validation`]
/// before building a vendor payload, and must surface every vendor failure
/// as [`RouterError::BackendCallFailed`].
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send one chat completion request and normalize the answer.
    ///
    /// # Arguments
    /// * `model`      — Backend-specific model id (e.g. `"gpt-4o"`).
    /// * `messages`   — Conversation in order; never empty.
    /// * `parameters` — Tuning values; keys must be in [`Self::allowed_parameters`].
    async fn chat(
        &self,
        model: &str,
        messages: &[Message],
        parameters: &Parameters,
    ) -> Result<ChatResponse, RouterError>;

    /// Registry name (e.g. `"openai"`), echoed in [`ChatResponse::provider`].
    fn name(&self) -> &str;

    /// Parameter names this backend forwards to the vendor.
    fn allowed_parameters(&self) -> &'static [&'static str];

    /// Concrete adapter type, for diagnostics.
    fn implementation(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A failure raised by a vendor client.
#[derive(Debug, Error)]
pub enum VendorError {
    /// Transport-level failure (connect, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The vendor answered with a non-success status.
    #[error("status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Other(String),
}

/// The single capability an adapter consumes from its vendor:
/// "send this native request, get the native response body back".
#[async_trait]
pub trait VendorClient<Req: Sync>: Send + Sync {
    async fn send(&self, request: &Req) -> Result<serde_json::Value, VendorError>;
}
