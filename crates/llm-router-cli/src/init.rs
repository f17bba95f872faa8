//! `llm-router init` — create `~/.llm-router/config.json` with defaults.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use llm_router_core::config::{get_config_path, save_config, Config};

/// Run the init command.
pub fn run() -> Result<()> {
    let config_path = get_config_path();

    println!();
    if write_default(&config_path)? {
        println!("  {} created config at {}", "✓".green(), config_path.display());
        println!(
            "{}",
            "  Add API keys under providers.openai / providers.anthropic, or set OPENAI_API_KEY / ANTHROPIC_API_KEY."
                .dimmed()
        );
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }
    println!();

    Ok(())
}

/// Write a default config unless one exists. Returns whether it wrote.
fn write_default(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(true)
}
