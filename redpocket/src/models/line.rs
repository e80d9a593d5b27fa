//! Line summary model.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::RedPocketError;
use crate::models::LineDetails;
use crate::traits::DetailsFetcher;

/// One mobile line as it appears in the account's line listing.
///
/// Identity is the phone number: two `Line` values hash and compare equal
/// when their numbers match, so lines stay uniquely keyed across a
/// collection.
#[derive(Clone, Serialize)]
pub struct Line {
    /// Raw account identifier from the listing payload. Opaque.
    pub account_id: String,
    /// Phone number, normalized from the portal's digit string.
    pub number: u64,
    /// Plan description.
    pub plan: String,
    /// Current plan expiration date.
    pub expiration: NaiveDate,
    /// Whether the line belongs to a family plan.
    pub family: bool,
    #[serde(skip_serializing)]
    fetcher: Option<Arc<dyn DetailsFetcher>>,
}

impl Line {
    /// Creates a line with no details fetcher bound.
    ///
    /// [`get_details`](Self::get_details) on such a line fails with
    /// [`RedPocketError::NoDetailsFetcher`]; lines obtained through
    /// [`RedPocket::get_lines`](crate::RedPocket::get_lines) come with the
    /// fetcher already bound.
    pub fn new(
        account_id: impl Into<String>,
        number: u64,
        plan: impl Into<String>,
        expiration: NaiveDate,
        family: bool,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            number,
            plan: plan.into(),
            expiration,
            family,
            fetcher: None,
        }
    }

    /// Binds the capability this line uses to fetch its own details.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn DetailsFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// The account identifier in the encoding the details endpoint expects:
    /// base64 of the raw listing id.
    pub fn account_hash(&self) -> String {
        BASE64.encode(self.account_id.as_bytes())
    }

    /// Fetches the full details for this line.
    ///
    /// # Errors
    ///
    /// [`RedPocketError::NoDetailsFetcher`] if the line was built without a
    /// fetcher; otherwise whatever the portal request produces.
    pub async fn get_details(&self) -> Result<LineDetails, RedPocketError> {
        let fetcher = self
            .fetcher
            .as_ref()
            .ok_or(RedPocketError::NoDetailsFetcher)?;
        fetcher.fetch_details(&self.account_hash()).await
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("account_id", &self.account_id)
            .field("number", &self.number)
            .field("plan", &self.plan)
            .field("expiration", &self.expiration)
            .field("family", &self.family)
            .field("fetcher", &self.fetcher.as_ref().map(|_| "DetailsFetcher"))
            .finish()
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Line {}

impl Hash for Line {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}
