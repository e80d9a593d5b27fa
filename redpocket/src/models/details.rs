//! Full line details model.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::clock::Clock;

/// Balance value meaning "unlimited" or "not applicable", as opposed to `0`
/// ("none remaining").
pub const BALANCE_UNLIMITED: i64 = -1;

/// Device information nested inside [`LineDetails`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phone {
    /// Handset model.
    pub model: String,
    /// Device IMEI.
    pub imei: String,
    /// SIM identifier.
    pub sim: String,
    /// Device ESN.
    pub esn: String,
}

/// Full billing and usage details for one line.
///
/// Balance fields use [`BALANCE_UNLIMITED`] (`-1`) as the "unlimited / not
/// applicable" sentinel. Remaining-cycle and remaining-months figures are
/// derived on access against an injected [`Clock`], so they change as time
/// passes rather than being cached at fetch time.
#[derive(Debug, Clone, Serialize)]
pub struct LineDetails {
    /// Phone number.
    pub number: u64,
    /// Product code.
    pub product_code: String,
    /// Account status as reported by the portal.
    pub status: String,
    /// Plan identifier.
    pub plan_id: String,
    /// Plan code.
    pub plan_code: String,
    /// Current plan expiration date.
    pub expiration: NaiveDate,
    /// Date of the last automatic renewal.
    pub last_autorenew: NaiveDate,
    /// Expiration date of the last purchased period.
    pub last_expiration: NaiveDate,
    /// Main balance.
    pub main_balance: i64,
    /// Voice minutes balance.
    pub voice_balance: i64,
    /// Messaging balance.
    pub messaging_balance: i64,
    /// Data balance in MB.
    pub data_balance: i64,
    /// Device information.
    pub phone: Phone,
}

impl LineDetails {
    /// Days until the plan refreshes, relative to the clock's today.
    ///
    /// Negative once the expiration date has passed.
    pub fn remaining_days_in_cycle(&self, clock: &dyn Clock) -> i64 {
        (self.expiration - clock.today()).num_days()
    }

    /// Whole months of purchased service left for automatic renewal,
    /// measured from the clock's today to the last purchased expiration.
    pub fn remaining_months_purchased(&self, clock: &dyn Clock) -> i32 {
        let today = clock.today();
        let end = self.last_expiration;
        (end.year() - today.year()) * 12 + (end.month() as i32 - today.month() as i32)
    }
}
