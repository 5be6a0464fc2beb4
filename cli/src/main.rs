//! Classroom Quickstart
//!
//! Authorizes against Google Classroom with the OAuth authorization-code flow,
//! caches the token, and lists the user's courses together with their
//! coursework and materials.

mod auth;
mod cli;
mod client;
mod config;
mod error;
mod format;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::settings::env;
use crate::config::{load_config, load_config_from};
use crate::error::Result;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging on stderr; stdout carries the report
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(env::LOG_LEVEL)
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Run the command
    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(path) = cli.client_secret {
        config.auth.client_secret_path = path;
    }

    match cli.command.unwrap_or(Commands::Courses) {
        Commands::Courses => cli::commands::handle_courses(&config, cli.open_browser)
            .await
            .map(cli::commands::ListOutcome::exit_code),
        Commands::Logout => cli::commands::handle_logout(&config).map(|()| 0),
        Commands::Status => cli::commands::handle_status(&config).map(|()| 0),
    }
}
