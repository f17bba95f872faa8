//! Provider registry — name → factory table for every supported backend.
//!
//! [`PROVIDERS`] is the process-wide, read-only table the [`Router`](crate::Router)
//! consults by default. Adding a backend means adding one [`ProviderEntry`];
//! the router's logic does not change. [`ProviderRegistry`] is an owned copy
//! of the table for callers that need to plug in their own adapters.

use std::fmt;

use llm_router_core::config::ProviderSettings;
use llm_router_core::RouterError;

use crate::traits::ChatProvider;
use crate::{anthropic, openai};

// ─────────────────────────────────────────────
// ProviderEntry — one registered backend
// ─────────────────────────────────────────────

/// Builds an adapter from an API key and pass-through settings.
pub type ProviderFactory =
    fn(&str, &ProviderSettings) -> Result<Box<dyn ChatProvider>, RouterError>;

/// Registration entry for one backend.
#[derive(Clone, Copy)]
pub struct ProviderEntry {
    /// Lookup key (e.g. `"openai"`). Matched case-insensitively.
    pub name: &'static str,
    /// Human-readable name for logs. E.g. `"OpenAI"`.
    pub display_name: &'static str,
    /// The vendor's conventional environment variable for the API key.
    pub env_key: &'static str,
    /// Constructor for the adapter.
    pub factory: ProviderFactory,
}

impl fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("env_key", &self.env_key)
            .finish()
    }
}

// ─────────────────────────────────────────────
// Built-in providers
// ─────────────────────────────────────────────

/// Built-in backends, in listing order.
pub static PROVIDERS: &[ProviderEntry] = &[
    ProviderEntry {
        name: openai::NAME,
        display_name: openai::DISPLAY_NAME,
        env_key: "OPENAI_API_KEY",
        factory: openai::build,
    },
    ProviderEntry {
        name: anthropic::NAME,
        display_name: anthropic::DISPLAY_NAME,
        env_key: "ANTHROPIC_API_KEY",
        factory: anthropic::build,
    },
];

/// Find a built-in provider by name (case-insensitive).
pub fn find_by_name(name: &str) -> Option<&'static ProviderEntry> {
    lookup(PROVIDERS, name)
}

/// Find the entry registered under `name` (case-insensitive).
pub fn lookup<'a>(entries: &'a [ProviderEntry], name: &str) -> Option<&'a ProviderEntry> {
    entries.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

// ─────────────────────────────────────────────
// ProviderRegistry — owned, extensible table
// ─────────────────────────────────────────────

/// An owned provider table, seeded from [`PROVIDERS`] or built from scratch.
#[derive(Clone, Debug, Default)]
pub struct ProviderRegistry {
    entries: Vec<ProviderEntry>,
}

impl ProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry containing every built-in provider.
    pub fn builtin() -> Self {
        ProviderRegistry {
            entries: PROVIDERS.to_vec(),
        }
    }

    /// Add an entry, replacing any existing entry whose name matches
    /// case-insensitively.
    pub fn register(&mut self, entry: ProviderEntry) -> &mut Self {
        match self
            .entries
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(entry.name))
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    /// Look up an entry by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ProviderEntry> {
        lookup(&self.entries, name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
