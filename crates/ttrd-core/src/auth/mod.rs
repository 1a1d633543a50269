//! Portal login: token scrape, credential POST, response classification.
//!
//! The portal guards its signin endpoint with an anti-forgery token embedded
//! in the login page, so logging in is a two-request dance: GET the page,
//! scrape the token, POST it back alongside the credentials. Cookies from
//! both responses accumulate in the session.

mod classify;
mod token;

pub use classify::{ClassifyLogin, LoginOutcome, LogoutMarker};
pub use token::extract_csrf_token;

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::session::Session;

/// Credential submission endpoint, resolved root-relative to the portal base.
const SIGNIN_PATH: &str = "/form/secursignin/signin";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid portal URL: {0}")]
    BadUrl(#[from] url::ParseError),

    #[error("login page request failed: {0}")]
    PageLoad(#[source] curl::Error),

    #[error("login page returned HTTP {0}")]
    PageStatus(u32),

    #[error("login page has no _csrf_token input")]
    TokenNotFound,

    #[error("login request failed: {0}")]
    RequestFailed(#[source] curl::Error),

    #[error("login rejected with HTTP {0}")]
    LoginFailed(u32),
}

/// An established session plus what the login response revealed about it.
#[derive(Debug)]
pub struct Login {
    pub session: Session,
    pub outcome: LoginOutcome,
}

/// Logs in to the portal at `base_url`. Single attempt, no retry.
///
/// Fetches the login page, scrapes the `_csrf_token` hidden input, and posts
/// the credential form to the signin endpoint. The response is read by
/// `classifier`: `Rejected` comes back as [`AuthError::LoginFailed`], while
/// `Unverified` is a soft success the caller should surface to the user.
///
/// No POST is issued when the page fails to load, returns non-200, or carries
/// no token.
pub fn login(
    base_url: &str,
    username: &str,
    password: &str,
    timeout: Duration,
    classifier: &dyn ClassifyLogin,
) -> Result<Login, AuthError> {
    let base = Url::parse(base_url)?;
    let signin = signin_url(&base)?;

    let mut session = Session::new().map_err(AuthError::PageLoad)?;

    tracing::debug!("loading login page {}", base);
    let page = session
        .get(base.as_str(), timeout)
        .map_err(AuthError::PageLoad)?;
    if page.status != 200 {
        return Err(AuthError::PageStatus(page.status));
    }

    let html = String::from_utf8_lossy(&page.body);
    let csrf_token = extract_csrf_token(&html).ok_or(AuthError::TokenNotFound)?;

    tracing::debug!("posting credentials to {}", signin);
    let response = session
        .post_form(
            signin.as_str(),
            &[
                ("email", username),
                ("password", password),
                ("_csrf_token", &csrf_token),
                ("locale", "en_us"),
                ("submit", "Login"),
            ],
            timeout,
        )
        .map_err(AuthError::RequestFailed)?;

    match classifier.classify(response.status, &response.body) {
        LoginOutcome::Rejected(status) => Err(AuthError::LoginFailed(status)),
        outcome => {
            tracing::info!("login outcome: {:?}", outcome);
            Ok(Login { session, outcome })
        }
    }
}

fn signin_url(base: &Url) -> Result<Url, url::ParseError> {
    base.join(SIGNIN_PATH)
}
