//! OpenAI-style call chain over any backend:
//! `client.chat().completions().create(model, messages, params)`.
//!
//! Pure forwarding to [`Router::chat`].

use llm_router_core::config::ProviderSettings;
use llm_router_core::{ChatResponse, Message, Parameters, RouterError};

use crate::router::Router;

#[derive(Debug)]
pub struct LlmClient {
    router: Router,
}

impl LlmClient {
    /// Build the underlying [`Router`] for `provider_name`.
    pub fn new(
        provider_name: &str,
        api_key: &str,
        settings: &ProviderSettings,
    ) -> Result<Self, RouterError> {
        Ok(Self::from_router(Router::new(provider_name, api_key, settings)?))
    }

    pub fn from_router(router: Router) -> Self {
        LlmClient { router }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn chat(&self) -> Chat<'_> {
        Chat {
            router: &self.router,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Chat<'a> {
    router: &'a Router,
}

impl<'a> Chat<'a> {
    pub fn completions(&self) -> Completions<'a> {
        Completions {
            router: self.router,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Completions<'a> {
    router: &'a Router,
}

impl Completions<'_> {
    pub async fn create(
        &self,
        model: &str,
        messages: &[Message],
        parameters: &Parameters,
    ) -> Result<ChatResponse, RouterError> {
        self.router.chat(model, messages, parameters).await
    }
}
