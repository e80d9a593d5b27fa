//! JSON output.

use anyhow::Result;
use redpocket::{Clock, Line, LineDetails};
use serde::Serialize;

/// One line paired with its details and the clock-derived fields, as emitted
/// by `details --format json`.
#[derive(Serialize)]
struct DetailsReport<'a> {
    line: &'a Line,
    details: &'a LineDetails,
    remaining_days_in_cycle: i64,
    remaining_months_purchased: i32,
}

/// Prints the line listing as JSON.
pub fn print_lines(lines: &[Line], pretty: bool) -> Result<()> {
    print(&lines, pretty)
}

/// Prints every line with its details as JSON.
pub fn print_details(all: &[(Line, LineDetails)], clock: &dyn Clock, pretty: bool) -> Result<()> {
    let reports: Vec<DetailsReport<'_>> = all
        .iter()
        .map(|(line, details)| DetailsReport {
            line,
            details,
            remaining_days_in_cycle: details.remaining_days_in_cycle(clock),
            remaining_months_purchased: details.remaining_months_purchased(clock),
        })
        .collect();
    print(&reports, pretty)
}

fn print<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
