//! Cookie-backed portal session.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::error::RedPocketError;

/// Name of the cookie the portal sets on a successful login.
pub(crate) const SESSION_COOKIE: &str = "redpocket";

/// Portal login credentials. Immutable once the session is built.
#[derive(Clone)]
pub(crate) struct Credentials {
    pub username: String,
    pub password: String,
}

/// Authenticated portal session: HTTP client, cookie jar, base URL, and the
/// credentials used to (re-)establish it.
///
/// The jar is the only mutable state; it is written by the server's
/// `Set-Cookie` headers during login and read by every request. Ordinary
/// data requests never mutate it.
pub(crate) struct Session {
    http: Client,
    jar: Arc<Jar>,
    base_url: Url,
    credentials: Credentials,
}

impl Session {
    /// Builds a session around a fresh, empty cookie jar.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, RedPocketError> {
        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("redpocket/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(Self {
            http,
            jar,
            base_url,
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resolves a path (which may carry a query string) against the portal
    /// base URL.
    pub fn url(&self, path: &str) -> Result<Url, RedPocketError> {
        Ok(self.base_url.join(path)?)
    }

    /// Performs a GET with the session cookies attached.
    pub async fn get(&self, path: &str) -> Result<Response, RedPocketError> {
        let url = self.url(path)?;
        debug!(%url, "Portal request: GET");
        Ok(self.http.get(url).send().await?)
    }

    /// Performs a form POST with the session cookies attached.
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<Response, RedPocketError> {
        let url = self.url(path)?;
        debug!(%url, "Portal request: POST");
        Ok(self.http.post(url).form(form).send().await?)
    }

    /// Drops the portal's session cookie from the jar.
    ///
    /// The login flow calls this before posting credentials so that
    /// [`has_session_cookie`](Self::has_session_cookie) afterwards reflects
    /// only cookies set during that exchange, never a stale cookie left over
    /// from an earlier login.
    pub fn clear_session_cookie(&self) {
        // An expired cookie removes the matching entry from the store.
        self.jar.add_cookie_str(
            &format!("{SESSION_COOKIE}=; Max-Age=0; path=/"),
            &self.base_url,
        );
    }

    /// True when the jar holds the portal's session cookie.
    pub fn has_session_cookie(&self) -> bool {
        self.jar
            .cookies(&self.base_url)
            .and_then(|header| header.to_str().map(str::to_owned).ok())
            .is_some_and(|cookies| {
                cookies
                    .split(';')
                    .filter_map(|pair| pair.trim().split_once('='))
                    .any(|(name, _)| name == SESSION_COOKIE)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            Url::parse("https://www.redpocket.com").unwrap(),
            Credentials {
                username: "fake".to_string(),
                password: "password".to_string(),
            },
            Duration::from_secs(30),
        )
        .unwrap()
    }

    #[test]
    fn fresh_session_has_no_cookie() {
        assert!(!session().has_session_cookie());
    }

    #[test]
    fn session_cookie_detected_in_jar() {
        let s = session();
        s.jar.add_cookie_str(
            "redpocket=p7cpn62s09rufdl0ggsskjrib7; path=/",
            &Url::parse("https://www.redpocket.com").unwrap(),
        );
        assert!(s.has_session_cookie());
    }

    #[test]
    fn clear_session_cookie_empties_the_jar_entry() {
        let s = session();
        s.jar.add_cookie_str(
            "redpocket=p7cpn62s09rufdl0ggsskjrib7; path=/",
            &Url::parse("https://www.redpocket.com").unwrap(),
        );
        assert!(s.has_session_cookie());

        s.clear_session_cookie();
        assert!(!s.has_session_cookie());
    }

    #[test]
    fn unrelated_cookie_is_not_a_session() {
        let s = session();
        s.jar.add_cookie_str(
            "tracking=abc; path=/",
            &Url::parse("https://www.redpocket.com").unwrap(),
        );
        assert!(!s.has_session_cookie());
    }

    #[test]
    fn paths_resolve_against_the_base_url() {
        let url = session().url("/account/get-details?id=MTIzNDU2").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.redpocket.com/account/get-details?id=MTIzNDU2"
        );
    }
}
