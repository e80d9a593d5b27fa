//! Login flow: CSRF scrape, credential POST, session-cookie validation.

use reqwest::StatusCode;
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::error::RedPocketError;
use crate::session::Session;

pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const MY_LINES_PATH: &str = "/my-lines";

/// Name of the hidden form field carrying the anti-forgery token.
const CSRF_FIELD: &str = "csrf";

/// Extracts the CSRF token from the login page HTML.
fn extract_csrf(html: &str) -> Result<String, RedPocketError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse(r#"input[name="csrf"]"#).expect("static selector");

    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_owned)
        .ok_or_else(|| {
            RedPocketError::Protocol("Failed to get CSRF token from login page!".to_string())
        })
}

/// Authenticates the session against the portal.
///
/// Fetches the login page, scrapes the CSRF token, posts the credentials,
/// and validates that the portal redirected to the lines page with a session
/// cookie set. On success the cookies accumulated along the way are the new
/// session; the jar is mutated in place, so re-login works on a live client.
///
/// A wrong password does not error at the HTTP level: the portal answers 200
/// on the login page without a usable cookie, which is indistinguishable
/// from any other soft auth failure.
pub(crate) async fn login(session: &Session) -> Result<(), RedPocketError> {
    // The cookie check below must only see cookies set by this exchange; on
    // a re-login the jar still holds the expired session cookie.
    session.clear_session_cookie();

    let page = session.get(LOGIN_PATH).await?;
    let csrf = extract_csrf(&page.text().await?)?;
    debug!(%csrf, "Submitting login form");

    let credentials = session.credentials();
    let form = [
        ("mdn", credentials.username.as_str()),
        ("password", credentials.password.as_str()),
        (CSRF_FIELD, csrf.as_str()),
    ];
    let response = session.post_form(LOGIN_PATH, &form).await?;

    let returned_ok = response.status() == StatusCode::OK;
    let landed_on_lines = response.url().path() == MY_LINES_PATH;
    if returned_ok && landed_on_lines && session.has_session_cookie() {
        info!("Authenticated to RedPocket");
        return Ok(());
    }
    Err(RedPocketError::Auth(
        "Failed to authenticate to RedPocket!".to_string(),
    ))
}
