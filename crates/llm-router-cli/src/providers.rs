//! `llm-router providers` — show registered backends and key status.

use anyhow::Result;
use colored::Colorize;

use llm_router_core::config::{get_config_path, load_config};
use llm_router_providers::registry::PROVIDERS;

/// Run the providers command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "llm-router providers".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );
    println!(
        "  {:<18} {} / {}",
        "Defaults:".bold(),
        config.defaults.provider,
        config.defaults.model
    );

    println!();
    for entry in PROVIDERS {
        let status = match config.providers.get_by_name(entry.name) {
            Some(p) if p.is_configured() => format!("{} (key set)", "✓".green()),
            _ => format!("{}", format!("· not configured ({})", entry.env_key).dimmed()),
        };
        println!("    {:<12} {:<12} {}", entry.name, entry.display_name, status);
    }
    println!();

    Ok(())
}
