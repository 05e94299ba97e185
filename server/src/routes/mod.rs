//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every endpoint the travel client talks to lives under `/api`. Auth routes
//! open and close sessions; everything else requires one and is guarded by
//! the [`auth::AuthUser`] extractor, which rejects with 401 and a `/login`
//! redirect hint.

pub mod auth;
pub mod bookings;
pub mod destinations;
pub mod nav;
pub mod profile;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// The full API router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::current_session))
        .route("/api/auth/events", get(auth::events))
        .route("/api/nav", get(nav::menu))
        .route("/api/destinations", get(destinations::list))
        .route("/api/destinations/{id}", get(destinations::get))
        .route("/api/bookings", get(bookings::list).post(bookings::create))
        .route("/api/bookings/{id}", get(bookings::get))
        .route("/api/profile", get(profile::get).patch(profile::update))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
