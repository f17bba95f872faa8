//! Router — picks a backend by name and forwards chat calls to it.

use serde::Serialize;
use tracing::debug;

use llm_router_core::config::ProviderSettings;
use llm_router_core::{ChatResponse, Message, Parameters, RouterError};

use crate::registry::{lookup, ProviderEntry, ProviderRegistry, PROVIDERS};
use crate::traits::ChatProvider;

/// Diagnostic summary of a constructed router.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    /// Normalized (lowercase) backend name.
    pub provider: String,
    /// Concrete adapter type.
    pub implementation: String,
}

/// Dispatches chat calls to one backend adapter.
pub struct Router {
    provider_name: String,
    provider: Box<dyn ChatProvider>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("provider", &self.provider_name)
            .field("implementation", &self.provider.implementation())
            .finish()
    }
}

impl Router {
    /// Build a router for `provider_name` from the built-in table.
    ///
    /// `api_key` and `settings` are handed to the adapter's factory untouched.
    pub fn new(
        provider_name: &str,
        api_key: &str,
        settings: &ProviderSettings,
    ) -> Result<Self, RouterError> {
        Self::from_entries(PROVIDERS, provider_name, api_key, settings)
    }

    /// Build a router from a caller-supplied registry.
    pub fn with_registry(
        registry: &ProviderRegistry,
        provider_name: &str,
        api_key: &str,
        settings: &ProviderSettings,
    ) -> Result<Self, RouterError> {
        Self::from_entries(registry.entries(), provider_name, api_key, settings)
    }

    /// Wrap an already-constructed adapter.
    pub fn from_provider(provider: Box<dyn ChatProvider>) -> Self {
        Router {
            provider_name: provider.name().to_lowercase(),
            provider,
        }
    }

    fn from_entries(
        entries: &[ProviderEntry],
        provider_name: &str,
        api_key: &str,
        settings: &ProviderSettings,
    ) -> Result<Self, RouterError> {
        let entry = lookup(entries, provider_name).ok_or_else(|| {
            RouterError::UnsupportedProvider {
                name: provider_name.to_string(),
                supported: entries.iter().map(|e| e.name.to_string()).collect(),
            }
        })?;

        debug!(
            provider = entry.display_name,
            api_base = settings.api_base.as_deref().unwrap_or("default"),
            "Creating LLM provider"
        );

        let provider = (entry.factory)(api_key, settings)?;
        Ok(Router {
            provider_name: entry.name.to_lowercase(),
            provider,
        })
    }

    /// Forward to the adapter's `chat`.
    pub async fn chat(
        &self,
        model: &str,
        messages: &[Message],
        parameters: &Parameters,
    ) -> Result<ChatResponse, RouterError> {
        self.provider.chat(model, messages, parameters).await
    }

    /// Backend name and adapter type. No network call.
    pub fn describe(&self) -> ProviderInfo {
        ProviderInfo {
            provider: self.provider_name.clone(),
            implementation: self.provider.implementation().to_string(),
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn provider(&self) -> &dyn ChatProvider {
        self.provider.as_ref()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
