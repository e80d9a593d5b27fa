//! Capability traits.

use async_trait::async_trait;

use crate::error::RedPocketError;
use crate::models::LineDetails;

/// Capability to fetch the details of a single line.
///
/// Each [`Line`](crate::Line) obtained through the normal listing path holds
/// one of these instead of a reference back to the whole client, so a line
/// can fetch its own details with ownership kept explicit.
#[async_trait]
pub trait DetailsFetcher: Send + Sync {
    /// Fetches line details for the given opaque account hash.
    async fn fetch_details(&self, account_hash: &str) -> Result<LineDetails, RedPocketError>;
}
