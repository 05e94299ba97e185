//! Auth routes: sign-up, password sign-in, sign-out, session lookup, and the
//! auth-state-change event stream.

use std::convert::Infallible;

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use futures::Stream;
use serde::{Deserialize, Serialize};
use time::Duration;
use travel::{AuthEvent, SessionUser};
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::events::UserEvents;
use crate::services::{auth as auth_svc, roles, session};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie or bearer header.
/// Use as a handler parameter to guard a route.
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

/// Pull the session token from the request: cookie first, then bearer header.
pub(crate) fn session_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value).filter(|v| !v.is_empty()) {
        return Some(token.to_owned());
    }
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)
            .filter(|t| session::is_well_formed(t))
            .ok_or_else(ApiError::login_required)?;

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, &token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                ApiError::Internal
            })?
            .ok_or_else(ApiError::login_required)?;

        Ok(Self { user, token })
    }
}

fn session_cookie(token: String, secure: bool, ttl_hours: u32) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::hours(i64::from(ttl_hours)))
        .build()
}

fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct SignUpBody {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Body returned after sign-up or sign-in.
#[derive(Serialize)]
pub struct SessionResponse {
    pub user: SessionUser,
    /// Where the client should navigate next.
    pub landing: String,
    /// Same value as the cookie, for clients that send a bearer header.
    pub token: String,
    /// Public id of this session, as carried by `signed_out` events.
    pub session_id: String,
}

async fn open_session(state: &AppState, jar: CookieJar, user: SessionUser) -> Result<(CookieJar, SessionResponse), ApiError> {
    let ttl_hours = state.config.session_ttl_hours;
    let token = session::create_session(&state.pool, user.id, ttl_hours)
        .await
        .map_err(auth_svc::AuthError::from)?;
    let is_admin = roles::is_admin(&state.pool, user.id)
        .await
        .map_err(auth_svc::AuthError::from)?;

    state.events.publish(AuthEvent::signed_in(user.clone()));
    tracing::info!(user_id = %user.id, is_admin, "signed in");

    let jar = jar.add(session_cookie(token.clone(), state.config.cookie_secure, ttl_hours));
    let landing = travel::nav::landing_for(is_admin).path();
    let session_id = session::session_id(&token);
    Ok((jar, SessionResponse { user, landing, token, session_id }))
}

/// `POST /api/auth/signup`: create an account and sign it in.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignUpBody>,
) -> Result<impl IntoResponse, ApiError> {
    let user = auth_svc::sign_up(&state.pool, &body.email, &body.password, body.full_name.as_deref()).await?;
    let (jar, resp) = open_session(&state, jar, user).await?;
    Ok((StatusCode::CREATED, jar, Json(resp)))
}

/// `POST /api/auth/login`: password sign-in.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, ApiError> {
    let user = auth_svc::sign_in(&state.pool, &body.email, &body.password).await?;
    let (jar, resp) = open_session(&state, jar, user).await?;
    Ok((jar, Json(resp)))
}

/// Event to publish once a sign-out's delete has run. A failed delete is an
/// error: the token would otherwise stay valid while the client forgets it.
pub(crate) fn signed_out_event(
    deleted: Result<Option<Uuid>, sqlx::Error>,
    token: &str,
) -> Result<Option<AuthEvent>, ApiError> {
    match deleted {
        Ok(Some(user_id)) => Ok(Some(AuthEvent::signed_out(user_id, session::session_id(token)))),
        Ok(None) => Ok(None),
        Err(e) => {
            tracing::error!(error = %e, "session delete failed");
            Err(ApiError::Internal)
        }
    }
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> Result<impl IntoResponse, ApiError> {
    let deleted = session::delete_session(&state.pool, &auth.token).await;
    if let Some(event) = signed_out_event(deleted, &auth.token)? {
        state.events.publish(event);
    }
    tracing::info!(user_id = %auth.user.id, "signed out");

    let jar = CookieJar::new().add(cleared_session_cookie(state.config.cookie_secure));
    Ok((jar, StatusCode::NO_CONTENT))
}

/// `GET /api/auth/session`: return the current user.
pub async fn current_session(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

pub(crate) fn event_stream(events: UserEvents) -> impl Stream<Item = Result<Event, Infallible>> {
    futures::stream::unfold(events, |mut events| async move {
        let event = events.next().await?;
        let sse = Event::default()
            .event(event.kind.as_str())
            .json_data(&event)
            .unwrap_or_else(|_| Event::default().event(event.kind.as_str()));
        Some((Ok(sse), events))
    })
}

/// `GET /api/auth/events`: server-sent stream of this user's auth events.
pub async fn events(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let events = state.events.subscribe(auth.user.id);
    Sse::new(event_stream(events)).keep_alive(KeepAlive::default())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
