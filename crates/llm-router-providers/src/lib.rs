//! LLM provider layer for llm-router.
//!
//! One chat call, many backends.
//!
//! # Architecture
//!
//! - [`traits::ChatProvider`] — trait that every backend adapter implements
//! - [`traits::VendorClient`] — the single vendor capability adapters consume
//! - [`openai`], [`anthropic`] — adapters translating to each vendor's shape
//! - [`registry`] — static name → factory table + an extensible copy
//! - [`router::Router`] — picks an adapter by name and forwards calls
//! - [`client::LlmClient`] — `client.chat().completions().create(...)` facade

pub mod anthropic;
pub mod client;
pub mod http_client;
pub mod openai;
pub mod registry;
pub mod router;
pub mod traits;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use anthropic::AnthropicProvider;
pub use client::LlmClient;
pub use http_client::HttpVendorClient;
pub use openai::OpenAiProvider;
pub use registry::{ProviderEntry, ProviderRegistry, PROVIDERS};
pub use router::{ProviderInfo, Router};
pub use traits::{ChatProvider, VendorClient, VendorError};
