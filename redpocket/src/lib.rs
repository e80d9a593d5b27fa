// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # RedPocket portal client
//!
//! Authenticates against the RedPocket Mobile customer portal and retrieves
//! per-line billing and usage data from its session-authenticated JSON
//! endpoints.
//!
//! The portal has no public API: login is an HTML form with an anti-forgery
//! token, the session is a cookie, and data endpoints answer with a
//! `{return_code, return_data}` wrapper. This crate owns that whole
//! lifecycle — token scraping, cookie session, envelope interpretation, and
//! a single re-login retry when the portal reports the session expired.
//!
//! ## Example
//!
//! ```no_run
//! use redpocket::RedPocket;
//!
//! # async fn run() -> Result<(), redpocket::RedPocketError> {
//! let client = RedPocket::login("8005551234", "hunter2").await?;
//! for line in client.get_lines().await? {
//!     let details = line.get_details().await?;
//!     println!("{}: {} MB data left", line.number, details.data_balance);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Key types
//!
//! - [`RedPocket`] - the portal client; construction logs in eagerly
//! - [`Line`] / [`LineDetails`] / [`Phone`] - domain models
//! - [`RedPocketError`] - the error taxonomy
//! - [`Clock`] - injectable "today" capability for date-derived fields

pub mod client;
pub mod clock;
pub mod error;
pub mod models;
pub mod traits;

mod envelope;
mod login;
mod session;
mod wire;

pub use client::{RedPocket, RedPocketBuilder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::RedPocketError;
pub use models::{BALANCE_UNLIMITED, Line, LineDetails, Phone};
pub use traits::DetailsFetcher;
