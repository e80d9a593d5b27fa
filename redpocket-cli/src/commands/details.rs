//! Details command - every line with its full details.

use anyhow::Result;
use redpocket::{RedPocket, SystemClock};
use tracing::info;

use crate::output::{json, text};
use crate::{Cli, OutputFormat};

/// Runs the details command.
pub async fn run(client: &RedPocket, cli: &Cli) -> Result<()> {
    let all = client.get_all_line_details().await?;
    info!(count = all.len(), "Fetched line details");

    let clock = SystemClock;
    match cli.format {
        OutputFormat::Text => text::print_details(&all, &clock),
        OutputFormat::Json => json::print_details(&all, &clock, cli.pretty)?,
    }
    Ok(())
}
