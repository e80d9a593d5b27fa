// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! RedPocket CLI - inspect your RedPocket lines from the command line.
//!
//! # Examples
//!
//! ```bash
//! # List lines (credentials from the environment)
//! REDPOCKET_USERNAME=8005551234 REDPOCKET_PASSWORD=... redpocket lines
//!
//! # Full details for every line
//! redpocket details
//!
//! # JSON output
//! redpocket details --format json --pretty
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use redpocket::RedPocket;

// ============================================================================
// CLI Definition
// ============================================================================

/// RedPocket CLI - line balances and details from the customer portal.
#[derive(Parser)]
#[command(name = "redpocket")]
#[command(about = "RedPocket Mobile account inspection CLI")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'lines' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Portal username (the account's phone number).
    #[arg(long, short, env = "REDPOCKET_USERNAME", global = true)]
    pub username: Option<String>,

    /// Portal password.
    #[arg(long, env = "REDPOCKET_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the account's lines (default if no command specified).
    #[command(visible_alias = "l")]
    Lines,

    /// Fetch every line together with its full details.
    #[command(visible_alias = "d")]
    Details,
}

/// Output format selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let username = cli
        .username
        .clone()
        .ok_or_else(|| anyhow::anyhow!("No username given (--username or REDPOCKET_USERNAME)"))?;
    let password = cli
        .password
        .clone()
        .ok_or_else(|| anyhow::anyhow!("No password given (--password or REDPOCKET_PASSWORD)"))?;

    let client = RedPocket::login(username, password).await?;

    match cli.command.as_ref().unwrap_or(&Commands::Lines) {
        Commands::Lines => commands::lines::run(&client, &cli).await,
        Commands::Details => commands::details::run(&client, &cli).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
