//! Login response classification.
//!
//! The portal answers a credential POST with an HTML page whether or not the
//! login worked, so telling the two apart is a content heuristic, not a status
//! check. The heuristic sits behind a trait so it can be swapped per portal
//! without touching request building.

/// What the login response revealed about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Positive evidence of a logged-in page.
    Verified,
    /// Plausible for a successful login but no evidence either way. The
    /// session may still be usable; callers should surface this distinctly.
    Unverified,
    /// Status rules out a successful login.
    Rejected(u32),
}

/// Reads a login response and decides what it means.
pub trait ClassifyLogin {
    fn classify(&self, status: u32, body: &[u8]) -> LoginOutcome;
}

/// Default heuristic: a 200 page containing "logout" (any case) is taken as a
/// logged-in page, since login forms do not offer a logout link. A 200 or 302
/// without the marker is accepted but left unverified.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutMarker;

impl ClassifyLogin for LogoutMarker {
    fn classify(&self, status: u32, body: &[u8]) -> LoginOutcome {
        let text = String::from_utf8_lossy(body).to_lowercase();
        if status == 200 && text.contains("logout") {
            LoginOutcome::Verified
        } else if status == 200 || status == 302 {
            LoginOutcome::Unverified
        } else {
            LoginOutcome::Rejected(status)
        }
    }
}
