//! Domain models for RedPocket accounts.
//!
//! ## Submodules
//!
//! - [`line`] - Line summary as shown in the portal's "other lines" listing
//! - [`details`] - Full line details (plan, device, balances)

mod details;
mod line;

pub use details::{BALANCE_UNLIMITED, LineDetails, Phone};
pub use line::Line;
