//! Destination catalog routes.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use travel::Destination;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::services::destinations;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchParams {
    /// The trimmed query, or `None` when it is absent or blank.
    pub(crate) fn query(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// `GET /api/destinations?q=`: every destination, optionally filtered by
/// name or location.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Destination>>, ApiError> {
    let rows = match params.query() {
        Some(q) => destinations::search_destinations(&state.pool, q).await?,
        None => destinations::list_destinations(&state.pool).await?,
    };
    Ok(Json(rows))
}

/// `GET /api/destinations/{id}`
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Destination>, ApiError> {
    Ok(Json(destinations::get_destination(&state.pool, id).await?))
}

#[cfg(test)]
#[path = "destinations_test.rs"]
mod tests;
