//! Shared CLI helpers — parameter parsing, response printing.

use anyhow::{bail, Result};
use colored::Colorize;
use serde_json::Value;

use llm_router_core::ChatResponse;

/// Parse `key=value`. The value is read as JSON when it parses
/// (`0.7`, `true`, `["END"]`), otherwise kept as a plain string.
pub fn parse_param(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("invalid parameter '{raw}': expected KEY=VALUE");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("invalid parameter '{raw}': empty key");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Print a normalized response to stdout.
pub fn print_response(response: &ChatResponse) {
    println!();
    println!(
        "{} {}",
        response.provider.cyan().bold(),
        format!("({})", response.model).dimmed()
    );
    if response.content.is_empty() {
        println!("{}", "(no content)".dimmed());
    } else {
        println!("{}", response.content);
    }
    if !response.usage.is_empty() {
        println!("{}", format!("usage: {}", response.usage).dimmed());
    }
    println!();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
