//! Lines command - list the account's lines.

use anyhow::Result;
use redpocket::RedPocket;
use tracing::info;

use crate::output::{json, text};
use crate::{Cli, OutputFormat};

/// Runs the lines command.
pub async fn run(client: &RedPocket, cli: &Cli) -> Result<()> {
    let lines = client.get_lines().await?;
    info!(count = lines.len(), "Fetched lines");

    match cli.format {
        OutputFormat::Text => text::print_lines(&lines),
        OutputFormat::Json => json::print_lines(&lines, cli.pretty)?,
    }
    Ok(())
}
