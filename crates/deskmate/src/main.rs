// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deskmate - an LLM-backed assistant for everyday employee tasks.
//!
//! This is the binary entry point for the Deskmate server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Deskmate - an LLM-backed assistant for everyday employee tasks.
#[derive(Parser, Debug)]
#[command(name = "deskmate", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Deskmate HTTP server.
    Serve,
    /// Load the configuration, validate it, and print a summary.
    Config,
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("deskmate={log_level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match deskmate_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            for error in &errors {
                eprintln!("deskmate: config error: {error}");
            }
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(error) = serve::run(config).await {
                tracing::error!(error = %error, "server exited with error");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            println!("agent.name          = {}", config.agent.name);
            println!("agent.log_level     = {}", config.agent.log_level);
            println!("agent.history_limit = {}", config.agent.history_limit);
            println!("agent.memory_limit  = {}", config.agent.memory_limit);
            println!("openai.model        = {}", config.openai.model);
            println!("openai.classifier   = {}", config.openai.classifier_model);
            println!("mem0.base_url       = {}", config.mem0.base_url);
            println!("storage.database    = {}", config.storage.database_path);
            println!("gateway.listen      = {}:{}", config.gateway.host, config.gateway.port);
        }
        None => {
            println!("deskmate: use --help for available commands");
        }
    }
}
