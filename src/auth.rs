//! Login credential handling and the session token guard.
//!
//! Authorization is NOT enforced here: the guard is a token-presence check,
//! matching the current product behavior. Credential payloads are validated
//! locally before any request is constructed, so a short password never
//! reaches the network.

use crate::error::ApiError;
use crate::prefs::PrefStore;

/// What the user typed into the login form. A single field doubles as
/// staff id or email; the payload builder decides which.
#[derive(Debug, Clone)]
pub struct StaffCredentials {
    pub staff_id_or_email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginChannel {
    Web,
    Mobile,
    Integration,
}

impl LoginChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginChannel::Web => "web",
            LoginChannel::Mobile => "mobile",
            LoginChannel::Integration => "integration",
        }
    }
}

/// Client context sent alongside credentials.
#[derive(Debug, Clone)]
pub struct LoginMetadata {
    pub channel: LoginChannel,
    pub device: String,
    pub version: String,
}

impl Default for LoginMetadata {
    fn default() -> Self {
        LoginMetadata {
            channel: LoginChannel::Web,
            device: "desktop".to_string(),
            version: crate::config::APP_VERSION.to_string(),
        }
    }
}

/// An authenticated session as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub issued_at: String,
}

pub const TOKEN_KEY: &str = "token";

/// Local validation, run before any payload is built.
pub fn validate_credentials(credentials: &StaffCredentials) -> Result<(), ApiError> {
    if credentials.staff_id_or_email.trim().is_empty() {
        return Err(ApiError::validation("Provide a staff ID or email."));
    }
    if credentials.password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters.",
        ));
    }
    Ok(())
}

/// Store the session token after a successful login.
pub fn store_session(store: &mut impl PrefStore, session: &Session) {
    store.set(TOKEN_KEY, &session.token);
}

/// Route guard placeholder: a stored token means "authenticated".
pub fn has_token(store: &impl PrefStore) -> bool {
    store.get(TOKEN_KEY).is_some_and(|t| !t.is_empty())
}

pub fn clear_session(store: &mut impl PrefStore) {
    store.remove(TOKEN_KEY);
}
