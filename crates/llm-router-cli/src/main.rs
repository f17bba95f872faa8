//! llm-router CLI — entry point.
//!
//! # Commands
//!
//! - `llm-router chat [-p PROVIDER] [-m MODEL] MESSAGE` — one chat completion
//!   (or `--messages-file conv.json` for a whole conversation)
//! - `llm-router providers` — list backends and key status
//! - `llm-router init` — write a default config file

mod chat;
mod helpers;
mod init;
mod providers;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// One chat call, any LLM backend
#[derive(Parser)]
#[command(name = "llm-router", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one chat completion request
    Chat(chat::ChatArgs),

    /// List registered providers and whether a key is configured
    Providers,

    /// Write a default config file
    Init,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat(args) => {
            init_logging(args.logs);
            chat::run(args).await
        }
        Commands::Providers => providers::run(),
        Commands::Init => init::run(),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("llm_router=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
