//! Human-readable text output.

use redpocket::{BALANCE_UNLIMITED, Clock, Line, LineDetails};

/// Prints the line listing.
pub fn print_lines(lines: &[Line]) {
    if lines.is_empty() {
        println!("No lines on this account.");
        return;
    }
    for line in lines {
        let family = if line.family { " [family]" } else { "" };
        println!(
            "{}  {}  expires {}{}",
            line.number, line.plan, line.expiration, family
        );
    }
}

/// Prints every line with its details.
pub fn print_details(all: &[(Line, LineDetails)], clock: &dyn Clock) {
    for (line, details) in all {
        println!("{} ({})", line.number, details.status);
        println!("  Plan:      {} [{}]", line.plan, details.plan_code);
        println!("  Device:    {}", details.phone.model);
        println!(
            "  Cycle:     {} days left (expires {})",
            details.remaining_days_in_cycle(clock),
            details.expiration
        );
        println!(
            "  Purchased: {} months remaining",
            details.remaining_months_purchased(clock)
        );
        println!(
            "  Balances:  data {}, voice {}, messaging {}",
            balance(details.data_balance),
            balance(details.voice_balance),
            balance(details.messaging_balance)
        );
        println!();
    }
}

fn balance(value: i64) -> String {
    if value == BALANCE_UNLIMITED {
        "unlimited".to_string()
    } else {
        value.to_string()
    }
}
