//! `llm-router chat` — one request through the compatibility client.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use llm_router_core::config::{load_config, Config};
use llm_router_core::validation::parse_messages;
use llm_router_core::{Message, Parameters};
use llm_router_providers::registry::find_by_name;
use llm_router_providers::LlmClient;

use crate::helpers;

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// User message to send
    #[arg(required_unless_present = "messages_file")]
    pub message: Option<String>,

    /// Read the whole conversation from a JSON array of {role, content}
    #[arg(long, value_name = "PATH", conflicts_with_all = ["message", "system"])]
    pub messages_file: Option<PathBuf>,

    /// Backend name (defaults to config `defaults.provider`)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Model id (defaults to config `defaults.model`)
    #[arg(short, long)]
    pub model: Option<String>,

    /// System instruction; repeat for several, sent in order before the message
    #[arg(short, long)]
    pub system: Vec<String>,

    /// Tuning parameter as key=value (value parsed as JSON, else string)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// API key (overrides config and environment)
    #[arg(long)]
    pub api_key: Option<String>,

    /// API base URL (overrides config)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Print the full normalized response as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub logs: bool,
}

pub async fn run(args: ChatArgs) -> Result<()> {
    let config = load_config(None);

    let provider = args
        .provider
        .clone()
        .unwrap_or_else(|| config.defaults.provider.clone());
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| config.defaults.model.clone());

    let provider_config = config
        .providers
        .get_by_name(&provider)
        .cloned()
        .unwrap_or_default();
    let api_key = args
        .api_key
        .clone()
        .unwrap_or_else(|| provider_config.api_key.clone());
    if api_key.is_empty() {
        match find_by_name(&provider) {
            Some(entry) => warn!(provider = %provider, "no API key configured; set {}", entry.env_key),
            None => warn!(provider = %provider, "no API key configured"),
        }
    }

    let mut settings = provider_config.settings();
    if let Some(ref base) = args.api_base {
        settings.api_base = Some(base.clone());
    }

    let messages = match (&args.messages_file, &args.message) {
        (Some(path), _) => read_messages(path)?,
        (None, Some(message)) => build_messages(&args.system, message),
        (None, None) => anyhow::bail!("either MESSAGE or --messages-file is required"),
    };
    let parameters = build_parameters(&config, &args.params)?;

    let client = LlmClient::new(&provider, &api_key, &settings)?;
    info!(provider = %provider, model = %model, "sending chat request");

    let response = client
        .chat()
        .completions()
        .create(&model, &messages, &parameters)
        .await
        .with_context(|| format!("chat request to '{provider}' failed"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        helpers::print_response(&response);
    }
    Ok(())
}

fn build_messages(system: &[String], message: &str) -> Vec<Message> {
    system
        .iter()
        .map(Message::system)
        .chain(std::iter::once(Message::user(message)))
        .collect()
}

fn read_messages(path: &Path) -> Result<Vec<Message>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(parse_messages(&value)?)
}

/// Config defaults first, then `--param` flags on top.
fn build_parameters(config: &Config, params: &[String]) -> Result<Parameters> {
    let mut parameters = Parameters::new();
    if let Some(t) = config.defaults.temperature {
        parameters.insert("temperature".into(), t.into());
    }
    if let Some(n) = config.defaults.max_tokens {
        parameters.insert("max_tokens".into(), n.into());
    }
    for raw in params {
        let (key, value) = helpers::parse_param(raw)?;
        parameters.insert(key, value);
    }
    Ok(parameters)
}
