//! Error types for the portal client.

use thiserror::Error;

/// Error type for all portal operations.
///
/// Every failure mode the portal can produce maps to a distinct variant so
/// callers can tell a bad password from a broken login page from an
/// application-level error code.
#[derive(Debug, Error)]
pub enum RedPocketError {
    /// The portal's HTML structure deviated from expectation (e.g. the login
    /// page carried no CSRF field). Fatal; never retried.
    #[error("{0}")]
    Protocol(String),

    /// Credentials were rejected at login, or the session could not be
    /// re-established after expiry.
    #[error("{0}")]
    Auth(String),

    /// Non-200 transport status, or an application-level return code from
    /// the response envelope. `code` is `None` for transport failures.
    #[error("{message}")]
    Api {
        /// Raw `return_code` from the envelope, when one was available.
        code: Option<i64>,
        /// Human-readable message; `"Unknown Error"` when the portal
        /// supplied none.
        message: String,
    },

    /// `get_details` was invoked on a line constructed without a details
    /// fetcher (e.g. a hand-built instance).
    #[error("Cannot get line details. No callback provided!")]
    NoDetailsFetcher,

    /// A payload field could not be mapped into the domain model.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A portal URL could not be constructed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
