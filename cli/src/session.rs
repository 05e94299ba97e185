//! Stored session: the token and user saved after sign-in.
//!
//! DESIGN
//! ======
//! The session file is the CLI's stand-in for the browser cookie jar. Every
//! protected page loads it, mirrors it into an [`AuthState`], and runs the
//! shared route guard before sending a request. A 401 from the server deletes
//! the file so the next run redirects to `/login` without asking.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use travel::nav::{self, GuardOutcome, Route};
use travel::{AuthState, SessionUser};

use crate::CliError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: SessionUser,
    /// Landing route picked at sign-in.
    #[serde(default)]
    pub landing: Option<String>,
    /// Public session id; matches the `session_id` of this session's
    /// `signed_out` event.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Read the session file. A missing or unreadable file means signed out.
pub async fn load(path: &Path) -> Option<StoredSession> {
    let raw = tokio::fs::read(path).await.ok()?;
    serde_json::from_slice(&raw).ok()
}

/// Write the session file.
///
/// # Errors
///
/// Returns an I/O or encoding error.
pub async fn save(path: &Path, session: &StoredSession) -> Result<(), CliError> {
    let raw = serde_json::to_vec_pretty(session)?;
    tokio::fs::write(path, raw).await?;
    Ok(())
}

/// Delete the session file. Deleting a missing file is fine.
///
/// # Errors
///
/// Returns any I/O error other than "not found".
pub async fn clear(path: &Path) -> Result<(), CliError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// The auth state a page sees for this stored session.
#[must_use]
pub fn auth_state(stored: Option<&StoredSession>) -> AuthState {
    AuthState::resolved(stored.map(|s| s.user.clone())).with_session_id(stored.and_then(|s| s.session_id.clone()))
}

/// Run the route guard for `route`. Returns the session when the page may
/// render, or the redirect otherwise.
///
/// # Errors
///
/// Returns [`CliError::LoginRequired`] carrying the redirect target.
pub fn require(route: &Route, stored: Option<StoredSession>) -> Result<StoredSession, CliError> {
    let state = auth_state(stored.as_ref());
    match (nav::guard(route, &state), stored) {
        (GuardOutcome::Allow, Some(session)) => Ok(session),
        (GuardOutcome::Redirect(to), _) => Err(CliError::LoginRequired { redirect: to.path() }),
        _ => Err(CliError::LoginRequired { redirect: Route::Login.path() }),
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
