//! Wire payload types for the portal's JSON endpoints.
//!
//! The portal's field naming is inconsistent (`productCode` next to
//! `plan_id`), balances are strings like `"7657MB"` or `"Unlimited"`, and
//! dates arrive in two formats. These structs absorb all of that and convert
//! into the domain models.

use std::sync::Arc;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;

use crate::error::RedPocketError;
use crate::models::{BALANCE_UNLIMITED, Line, LineDetails, Phone};
use crate::traits::DetailsFetcher;

/// Default the portal uses when a date field is absent.
const EPOCH_DATE: &str = "12/31/1969";

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D+").expect("static regex"));

fn balance_not_available() -> String {
    "N/A".to_string()
}

fn epoch_date() -> String {
    EPOCH_DATE.to_string()
}

/// `return_data` of `GET /account/get-other-lines`.
#[derive(Debug, Deserialize)]
pub(crate) struct LinesPayload {
    /// Confirmed lines on the account.
    #[serde(rename = "confirmedLines", default)]
    pub confirmed_lines: Vec<LineEntry>,
}

/// One entry of the line listing.
#[derive(Debug, Deserialize)]
pub(crate) struct LineEntry {
    #[serde(rename = "e_users_accounts_id")]
    pub account_id: String,
    /// Phone number as a digit string.
    pub mdn: String,
    #[serde(rename = "plan_description", default)]
    pub plan: String,
    /// Plan expiration, `%m/%d/%Y`.
    #[serde(default = "epoch_date")]
    pub aed: String,
    /// `"no"` for single lines, anything else means family plan.
    #[serde(default)]
    pub family: String,
}

impl LineEntry {
    /// Maps the entry into a [`Line`], binding the details fetcher when one
    /// is supplied.
    pub fn into_line(
        self,
        fetcher: Option<Arc<dyn DetailsFetcher>>,
    ) -> Result<Line, RedPocketError> {
        let number = parse_number(&self.mdn)?;
        let line = Line::new(
            self.account_id,
            number,
            self.plan,
            parse_portal_date(&self.aed)?,
            self.family != "no",
        );
        Ok(match fetcher {
            Some(fetcher) => line.with_fetcher(fetcher),
            None => line,
        })
    }
}

/// `return_data` of `GET /account/get-details`.
#[derive(Debug, Deserialize)]
pub(crate) struct LineDetailsEntry {
    pub mdn: String,
    #[serde(rename = "productCode", default)]
    pub product_code: String,
    #[serde(rename = "accountStatus", default)]
    pub status: String,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub plan_code: String,
    #[serde(default = "epoch_date")]
    pub aed: String,
    #[serde(rename = "lastAutoRenewDate", default = "epoch_date")]
    pub last_autorenew: String,
    #[serde(rename = "lastExpirationDate", default = "epoch_date")]
    pub last_expiration: String,
    #[serde(default = "balance_not_available")]
    pub main_balance: String,
    #[serde(default = "balance_not_available")]
    pub voice_balance: String,
    #[serde(default = "balance_not_available")]
    pub messaging_balance: String,
    #[serde(default = "balance_not_available")]
    pub data_balance: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub imei: String,
    #[serde(default)]
    pub sim: String,
    #[serde(default)]
    pub esn: String,
}

impl LineDetailsEntry {
    /// Maps the payload into [`LineDetails`].
    pub fn into_details(self) -> Result<LineDetails, RedPocketError> {
        Ok(LineDetails {
            number: parse_number(&self.mdn)?,
            product_code: self.product_code,
            status: self.status,
            plan_id: self.plan_id,
            plan_code: self.plan_code,
            expiration: parse_portal_date(&self.aed)?,
            last_autorenew: parse_portal_date(&self.last_autorenew)?,
            last_expiration: parse_portal_date(&self.last_expiration)?,
            main_balance: sanitize_balance(&self.main_balance)?,
            voice_balance: sanitize_balance(&self.voice_balance)?,
            messaging_balance: sanitize_balance(&self.messaging_balance)?,
            data_balance: sanitize_balance(&self.data_balance)?,
            phone: Phone {
                model: self.model,
                imei: self.imei,
                sim: self.sim,
                esn: self.esn,
            },
        })
    }
}

/// Normalizes a phone number digit string into an integer.
fn parse_number(mdn: &str) -> Result<u64, RedPocketError> {
    mdn.parse()
        .map_err(|_| RedPocketError::InvalidData(format!("Invalid phone number: {mdn:?}")))
}

/// Parses a portal date, trying both formats the portal is known to emit.
fn parse_portal_date(date: &str) -> Result<NaiveDate, RedPocketError> {
    NaiveDate::parse_from_str(date, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .map_err(|_| RedPocketError::InvalidData(format!("Invalid date: {date:?}")))
}

/// Turns a portal balance string into a number, mapping `"Unlimited"` and
/// `"N/A"` to the [`BALANCE_UNLIMITED`] sentinel and stripping units from
/// the rest (`"7657MB"` -> `7657`).
fn sanitize_balance(balance: &str) -> Result<i64, RedPocketError> {
    if matches!(balance.to_lowercase().as_str(), "unlimited" | "n/a") {
        return Ok(BALANCE_UNLIMITED);
    }
    let digits = NON_DIGITS.replace_all(balance, "");
    digits
        .parse()
        .map_err(|_| RedPocketError::InvalidData(format!("Invalid balance: {balance:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn balance_sentinels_map_to_unlimited() {
        assert_eq!(sanitize_balance("Unlimited").unwrap(), BALANCE_UNLIMITED);
        assert_eq!(sanitize_balance("unlimited").unwrap(), BALANCE_UNLIMITED);
        assert_eq!(sanitize_balance("N/A").unwrap(), BALANCE_UNLIMITED);
        assert_eq!(sanitize_balance("n/a").unwrap(), BALANCE_UNLIMITED);
    }

    #[test]
    fn balance_units_are_stripped() {
        assert_eq!(sanitize_balance("7657MB").unwrap(), 7657);
        assert_eq!(sanitize_balance("1,024 MB").unwrap(), 1024);
        assert_eq!(sanitize_balance("0").unwrap(), 0);
    }

    #[test]
    fn balance_without_digits_is_invalid() {
        let err = sanitize_balance("lots").unwrap_err();
        assert!(matches!(err, RedPocketError::InvalidData(_)));
    }

    #[test]
    fn dates_parse_in_both_portal_formats() {
        let expected = NaiveDate::from_ymd_opt(2022, 1, 2).unwrap();
        assert_eq!(parse_portal_date("01/02/2022").unwrap(), expected);
        assert_eq!(parse_portal_date("2022-01-02").unwrap(), expected);
        assert!(parse_portal_date("02.01.2022").is_err());
    }

    #[test]
    fn listing_entry_maps_into_line() {
        let entry: LineEntry = serde_json::from_value(json!({
            "e_users_accounts_id": "123456",
            "mdn": "1234567890",
            "plan_description": "Annual- Unlimited Everything + 8GB",
            "aed": "01/02/2022",
            "family": "no"
        }))
        .unwrap();

        let line = entry.into_line(None).unwrap();
        assert_eq!(line.account_id, "123456");
        assert_eq!(line.number, 1_234_567_890);
        assert_eq!(line.plan, "Annual- Unlimited Everything + 8GB");
        assert_eq!(line.expiration, NaiveDate::from_ymd_opt(2022, 1, 2).unwrap());
        assert!(!line.family);
    }

    #[test]
    fn number_normalization_round_trips() {
        let entry: LineEntry = serde_json::from_value(json!({
            "e_users_accounts_id": "123456",
            "mdn": "1234567890",
            "plan_description": "x",
            "aed": "01/02/2022",
            "family": "no"
        }))
        .unwrap();
        let line = entry.into_line(None).unwrap();
        assert_eq!(line.number.to_string(), "1234567890");
    }

    #[test]
    fn non_numeric_number_is_invalid() {
        let entry: LineEntry = serde_json::from_value(json!({
            "e_users_accounts_id": "123456",
            "mdn": "not-a-number",
            "aed": "01/02/2022",
            "family": "no"
        }))
        .unwrap();
        assert!(matches!(
            entry.into_line(None),
            Err(RedPocketError::InvalidData(_))
        ));
    }

    #[test]
    fn family_flag_is_no_or_anything_else() {
        for (raw, expected) in [("no", false), ("yes", true), ("", true)] {
            let entry: LineEntry = serde_json::from_value(json!({
                "e_users_accounts_id": "1",
                "mdn": "1234567890",
                "aed": "01/02/2022",
                "family": raw
            }))
            .unwrap();
            assert_eq!(entry.into_line(None).unwrap().family, expected, "family={raw:?}");
        }
    }

    #[test]
    fn details_entry_maps_into_line_details() {
        let entry: LineDetailsEntry = serde_json::from_value(json!({
            "mdn": "1234567890",
            "productCode": "GSMA",
            "accountStatus": "Active",
            "plan_id": "355",
            "plan_code": "RPUE8",
            "aed": "05/12/2021",
            "lastAutoRenewDate": "2021-12-03",
            "lastExpirationDate": "2022-01-02",
            "main_balance": "Unlimited",
            "voice_balance": "Unlimited",
            "messaging_balance": "Unlimited",
            "data_balance": "7657MB",
            "model": "Moto G7",
            "imei": "123456789012345",
            "sim": "89012345678901234567",
            "esn": ""
        }))
        .unwrap();

        let details = entry.into_details().unwrap();
        assert_eq!(details.number, 1_234_567_890);
        assert_eq!(details.product_code, "GSMA");
        assert_eq!(details.status, "Active");
        assert_eq!(details.expiration, NaiveDate::from_ymd_opt(2021, 5, 12).unwrap());
        assert_eq!(details.last_autorenew, NaiveDate::from_ymd_opt(2021, 12, 3).unwrap());
        assert_eq!(details.last_expiration, NaiveDate::from_ymd_opt(2022, 1, 2).unwrap());
        assert_eq!(details.main_balance, BALANCE_UNLIMITED);
        assert_eq!(details.data_balance, 7657);
        assert_eq!(details.phone.model, "Moto G7");
    }

    #[test]
    fn absent_balances_default_to_unlimited() {
        let entry: LineDetailsEntry = serde_json::from_value(json!({
            "mdn": "1234567890"
        }))
        .unwrap();
        let details = entry.into_details().unwrap();
        assert_eq!(details.main_balance, BALANCE_UNLIMITED);
        assert_eq!(details.voice_balance, BALANCE_UNLIMITED);
        assert_eq!(details.messaging_balance, BALANCE_UNLIMITED);
        assert_eq!(details.data_balance, BALANCE_UNLIMITED);
        // Absent dates take the portal's epoch default.
        assert_eq!(details.expiration, NaiveDate::from_ymd_opt(1969, 12, 31).unwrap());
    }
}
