//! ciqgen CLI - command-line interface
//!
//! One subcommand per planning tool: script generation, XML bundles, and
//! output-folder housekeeping.

mod cli;
mod commands;
mod config_loader;
mod output;
mod output_types;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse CLI arguments and execute the command
    let cli = Cli::parse();
    commands::execute(cli)
}
