//! The portal client: eager login, single-retry orchestration, and the data
//! operations built on top of it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::envelope::{self, Outcome};
use crate::error::RedPocketError;
use crate::login;
use crate::models::{Line, LineDetails};
use crate::session::{Credentials, Session};
use crate::traits::DetailsFetcher;
use crate::wire::{LineDetailsEntry, LinesPayload};

/// Production portal base URL.
const PORTAL_BASE: &str = "https://www.redpocket.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const OTHER_LINES_PATH: &str = "/account/get-other-lines";
const DETAILS_PATH: &str = "/account/get-details";

/// Client for one RedPocket account.
///
/// Construction performs the login eagerly and fails fast on auth or
/// protocol errors; see [`RedPocket::login`] and [`RedPocket::builder`].
///
/// The client issues requests strictly sequentially. Its only mutable state
/// is the session cookie jar, which is rewritten in place when the portal
/// reports the session expired and the client logs back in.
pub struct RedPocket {
    handle: Arc<PortalHandle>,
}

impl RedPocket {
    /// Logs in against the production portal with default settings.
    ///
    /// # Errors
    ///
    /// [`RedPocketError::Protocol`] when the login page carries no CSRF
    /// field, [`RedPocketError::Auth`] when the portal rejects the
    /// credentials.
    pub async fn login(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, RedPocketError> {
        Self::builder(username, password).login().await
    }

    /// Starts a builder for overriding the base URL or timeout.
    pub fn builder(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> RedPocketBuilder {
        RedPocketBuilder {
            username: username.into(),
            password: password.into(),
            base_url: PORTAL_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Lists the account's confirmed lines.
    ///
    /// Each returned [`Line`] comes bound to a details fetcher, so
    /// [`Line::get_details`] works without further wiring.
    pub async fn get_lines(&self) -> Result<Vec<Line>, RedPocketError> {
        let data = self.handle.request(OTHER_LINES_PATH).await?;
        let payload: Option<LinesPayload> = serde_json::from_value(data)?;
        let entries = payload.map(|p| p.confirmed_lines).unwrap_or_default();

        let mut lines = Vec::with_capacity(entries.len());
        for entry in entries {
            let fetcher: Arc<dyn DetailsFetcher> = Arc::new(PortalDetailsFetcher {
                handle: Arc::clone(&self.handle),
            });
            lines.push(entry.into_line(Some(fetcher))?);
        }
        Ok(lines)
    }

    /// Fetches the details of one line by its opaque account hash.
    ///
    /// The hash is passed through verbatim; [`Line::account_hash`] produces
    /// the right encoding for lines obtained from [`get_lines`](Self::get_lines).
    pub async fn get_line_details(
        &self,
        account_hash: &str,
    ) -> Result<LineDetails, RedPocketError> {
        self.handle.fetch_line_details(account_hash).await
    }

    /// Fetches every line together with its details.
    pub async fn get_all_line_details(
        &self,
    ) -> Result<Vec<(Line, LineDetails)>, RedPocketError> {
        let lines = self.get_lines().await?;
        let mut all = Vec::with_capacity(lines.len());
        for line in lines {
            let details = line.get_details().await?;
            all.push((line, details));
        }
        Ok(all)
    }
}

impl fmt::Debug for RedPocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedPocket").finish_non_exhaustive()
    }
}

/// Builder for [`RedPocket`].
#[derive(Debug)]
pub struct RedPocketBuilder {
    username: String,
    password: String,
    base_url: String,
    timeout: Duration,
}

impl RedPocketBuilder {
    /// Overrides the portal base URL (used by the integration tests to point
    /// the client at a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the session and performs the login.
    ///
    /// # Errors
    ///
    /// See [`RedPocket::login`].
    pub async fn login(self) -> Result<RedPocket, RedPocketError> {
        let base_url = Url::parse(&self.base_url)?;
        let session = Session::new(
            base_url,
            Credentials {
                username: self.username,
                password: self.password,
            },
            self.timeout,
        )?;
        login::login(&session).await?;
        Ok(RedPocket {
            handle: Arc::new(PortalHandle { session }),
        })
    }
}

/// Shared portal handle: the session plus the retry orchestrator.
///
/// Lines hold this (through [`PortalDetailsFetcher`]) rather than the whole
/// client, so a `Line` can outlive the `RedPocket` value that produced it.
struct PortalHandle {
    session: Session,
}

impl PortalHandle {
    /// One authenticated request passed through the envelope interpreter.
    async fn attempt(&self, path: &str) -> Result<Outcome, RedPocketError> {
        let response = self.session.get(path).await?;
        envelope::interpret(response).await
    }

    /// Performs an enveloped GET under the single-retry policy.
    ///
    /// Transport and application errors fail immediately; a session-expired
    /// outcome triggers exactly one re-login and one re-attempt. A second
    /// non-success after re-authentication is an auth failure, never another
    /// retry.
    async fn request(&self, path: &str) -> Result<Value, RedPocketError> {
        match self.attempt(path).await? {
            Outcome::Success(data) => Ok(data),
            Outcome::Transport(status) => {
                warn!(%status, path, "Portal returned non-200");
                Err(RedPocketError::Api {
                    code: None,
                    message: "API Returned Non-200 Response!".to_string(),
                })
            }
            Outcome::ApplicationError { code, message } => {
                warn!(code, %message, path, "Portal returned error code");
                Err(RedPocketError::Api {
                    code: Some(code),
                    message,
                })
            }
            Outcome::SessionExpired => {
                debug!(path, "Session expired, re-authenticating");
                login::login(&self.session).await?;
                match self.attempt(path).await? {
                    Outcome::Success(data) => Ok(data),
                    _ => Err(RedPocketError::Auth(
                        "Request failed even after re-authentication!".to_string(),
                    )),
                }
            }
        }
    }

    async fn fetch_line_details(
        &self,
        account_hash: &str,
    ) -> Result<LineDetails, RedPocketError> {
        let data = self
            .request(&format!("{DETAILS_PATH}?id={account_hash}"))
            .await?;
        let entry: LineDetailsEntry = serde_json::from_value(data)?;
        entry.into_details()
    }
}

/// The details-fetch capability bound to every line from the listing path.
struct PortalDetailsFetcher {
    handle: Arc<PortalHandle>,
}

#[async_trait]
impl DetailsFetcher for PortalDetailsFetcher {
    async fn fetch_details(&self, account_hash: &str) -> Result<LineDetails, RedPocketError> {
        self.handle.fetch_line_details(account_hash).await
    }
}
