//! Auth-session state and the session-change notification contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server publishes an [`AuthEvent`] whenever a user's session or profile
//! changes. Clients fold those events into an [`AuthState`], which the route
//! guard in [`crate::nav`] reads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::SessionUser;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventKind {
    SignedIn,
    SignedOut,
    ProfileUpdated,
}

impl AuthEventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignedIn => "signed_in",
            Self::SignedOut => "signed_out",
            Self::ProfileUpdated => "profile_updated",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub user_id: Uuid,
    /// Present for `signed_in`, so listeners can update without a round trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    /// Present for `signed_out`: which of the user's sessions ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuthEvent {
    #[must_use]
    pub fn signed_in(user: SessionUser) -> Self {
        Self { kind: AuthEventKind::SignedIn, user_id: user.id, user: Some(user), session_id: None }
    }

    #[must_use]
    pub fn signed_out(user_id: Uuid, session_id: impl Into<String>) -> Self {
        Self { kind: AuthEventKind::SignedOut, user_id, user: None, session_id: Some(session_id.into()) }
    }

    #[must_use]
    pub fn profile_updated(user_id: Uuid) -> Self {
        Self { kind: AuthEventKind::ProfileUpdated, user_id, user: None, session_id: None }
    }
}

/// Client-side view of the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    /// Id of the session this client holds, when known.
    pub session_id: Option<String>,
    /// True until the first session lookup completes.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, session_id: None, loading: true }
    }
}

impl AuthState {
    /// State after a completed session lookup.
    #[must_use]
    pub fn resolved(user: Option<SessionUser>) -> Self {
        Self { user, session_id: None, loading: false }
    }

    #[must_use]
    pub fn with_session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Fold a session-change notification into the state.
    ///
    /// Events for other users are ignored, except `signed_in`, which replaces
    /// whatever user was held before. `signed_out` only ends this state when
    /// it names the session held here; another device signing out the same
    /// user leaves it alone.
    pub fn apply(&mut self, event: &AuthEvent) {
        match event.kind {
            AuthEventKind::SignedIn => {
                if let Some(user) = &event.user {
                    self.user = Some(user.clone());
                }
                self.loading = false;
            }
            AuthEventKind::SignedOut => {
                let same_user = self.user.as_ref().is_some_and(|u| u.id == event.user_id);
                let same_session = match &event.session_id {
                    Some(ended) => self.session_id.as_deref() == Some(ended.as_str()),
                    None => true,
                };
                if same_user && same_session {
                    self.user = None;
                }
                self.loading = false;
            }
            AuthEventKind::ProfileUpdated => {}
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
