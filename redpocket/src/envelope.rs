//! Interpretation of the portal's `{return_code, return_data}` wrapper.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::error::RedPocketError;

/// `return_code` for a successful request.
const RETURN_CODE_OK: i64 = 1;

/// `return_code` the portal answers with when it no longer considers the
/// session logged in.
const RETURN_CODE_SESSION_EXPIRED: i64 = 11;

/// Message used when the portal supplies none.
const UNKNOWN_ERROR: &str = "Unknown Error";

// Absent return_code counts as an application error, not success.
fn missing_return_code() -> i64 {
    -1
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default = "missing_return_code")]
    return_code: i64,
    #[serde(default)]
    return_data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Outcome of one enveloped portal request.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// `return_code == 1`; carries `return_data` (null for bodiless
    /// successes).
    Success(Value),
    /// The portal wants a fresh login.
    SessionExpired,
    /// Any other `return_code`.
    ApplicationError {
        code: i64,
        message: String,
    },
    /// Non-200 status. The body is not read in this case.
    Transport(StatusCode),
}

/// Interprets a raw portal response into an [`Outcome`].
pub(crate) async fn interpret(response: Response) -> Result<Outcome, RedPocketError> {
    let status = response.status();
    if status != StatusCode::OK {
        return Ok(Outcome::Transport(status));
    }
    let body = response.text().await?;
    decode(&body)
}

/// Decodes the envelope out of a 200 response body.
pub(crate) fn decode(body: &str) -> Result<Outcome, RedPocketError> {
    let raw: RawEnvelope = serde_json::from_str(body)?;
    Ok(match raw.return_code {
        RETURN_CODE_OK => Outcome::Success(raw.return_data.unwrap_or(Value::Null)),
        RETURN_CODE_SESSION_EXPIRED => Outcome::SessionExpired,
        code => Outcome::ApplicationError {
            code,
            message: raw.message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_carries_return_data_untouched() {
        let body = json!({
            "return_code": 1,
            "return_data": {"confirmedLines": [{"mdn": "1234567890"}]}
        })
        .to_string();

        match decode(&body).unwrap() {
            Outcome::Success(data) => {
                assert_eq!(data["confirmedLines"][0]["mdn"], "1234567890");
            }
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[test]
    fn success_without_data_yields_null() {
        match decode(r#"{"return_code": 1}"#).unwrap() {
            Outcome::Success(data) => assert!(data.is_null()),
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[test]
    fn sentinel_eleven_means_session_expired() {
        assert!(matches!(
            decode(r#"{"return_code": 11, "return_data": {}}"#).unwrap(),
            Outcome::SessionExpired
        ));
    }

    #[test]
    fn other_codes_are_application_errors_with_default_message() {
        match decode(r#"{"return_code": -1}"#).unwrap() {
            Outcome::ApplicationError { code, message } => {
                assert_eq!(code, -1);
                assert_eq!(message, "Unknown Error");
            }
            other => panic!("expected ApplicationError, got {other:?}"),
        }
    }

    #[test]
    fn portal_supplied_message_is_preserved() {
        match decode(r#"{"return_code": 7, "message": "Account locked"}"#).unwrap() {
            Outcome::ApplicationError { code, message } => {
                assert_eq!(code, 7);
                assert_eq!(message, "Account locked");
            }
            other => panic!("expected ApplicationError, got {other:?}"),
        }
    }

    #[test]
    fn missing_return_code_is_an_application_error() {
        assert!(matches!(
            decode(r#"{"return_data": {}}"#).unwrap(),
            Outcome::ApplicationError { code: -1, .. }
        ));
    }

    #[test]
    fn non_json_body_is_a_json_error() {
        assert!(matches!(
            decode("<html>maintenance</html>"),
            Err(RedPocketError::Json(_))
        ));
    }
}
