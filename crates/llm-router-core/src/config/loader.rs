//! Config loader — reads `~/.llm-router/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.llm-router/config.json`
//! 3. Environment variables `LLM_ROUTER_<SECTION>__<FIELD>` (override JSON)
//! 4. Standard vendor variables (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`) fill
//!    keys that are still empty

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    let config = load_config_from_path(&config_path);
    apply_env_overrides(config, |name| std::env::var(name).ok())
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment overrides on top of a loaded config.
///
/// `lookup` resolves a variable name; `load_config` passes `std::env::var`.
///
/// Supported overrides:
/// - `LLM_ROUTER_DEFAULTS__PROVIDER` → `defaults.provider`
/// - `LLM_ROUTER_DEFAULTS__MODEL` → `defaults.model`
/// - `LLM_ROUTER_DEFAULTS__TEMPERATURE` → `defaults.temperature`
/// - `LLM_ROUTER_DEFAULTS__MAX_TOKENS` → `defaults.max_tokens`
/// - `LLM_ROUTER_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
/// - `LLM_ROUTER_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("LLM_ROUTER_DEFAULTS__PROVIDER") {
        config.defaults.provider = val;
    }
    if let Some(val) = lookup("LLM_ROUTER_DEFAULTS__MODEL") {
        config.defaults.model = val;
    }
    if let Some(val) = lookup("LLM_ROUTER_DEFAULTS__TEMPERATURE") {
        match val.parse::<f64>() {
            Ok(t) => config.defaults.temperature = Some(t),
            Err(_) => warn!("Ignoring non-numeric LLM_ROUTER_DEFAULTS__TEMPERATURE={}", val),
        }
    }
    if let Some(val) = lookup("LLM_ROUTER_DEFAULTS__MAX_TOKENS") {
        match val.parse::<u32>() {
            Ok(n) => config.defaults.max_tokens = Some(n),
            Err(_) => warn!("Ignoring non-integer LLM_ROUTER_DEFAULTS__MAX_TOKENS={}", val),
        }
    }

    apply_provider_env(&mut config.providers.openai, "OPENAI", &lookup);
    apply_provider_env(&mut config.providers.anthropic, "ANTHROPIC", &lookup);

    config
}

/// Apply env var overrides for a single provider.
///
/// The vendor's own variable (e.g. `OPENAI_API_KEY`) is consulted last and
/// only when no key was configured elsewhere.
fn apply_provider_env<F>(provider: &mut ProviderConfig, name: &str, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(&format!("LLM_ROUTER_PROVIDERS__{name}__API_KEY")) {
        provider.api_key = val;
    }
    if let Some(val) = lookup(&format!("LLM_ROUTER_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
    if !provider.is_configured() {
        if let Some(val) = lookup(&format!("{name}_API_KEY")) {
            provider.api_key = val;
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
