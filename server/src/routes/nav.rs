//! Navigation menu for the signed-in user.

use axum::extract::State;
use axum::response::Json;
use travel::nav::NavMenu;

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::services::roles;
use crate::state::AppState;

/// `GET /api/nav`: the admin or user menu, by role.
pub async fn menu(State(state): State<AppState>, auth: AuthUser) -> Result<Json<NavMenu>, ApiError> {
    let is_admin = roles::is_admin(&state.pool, auth.user.id).await.map_err(|e| {
        tracing::error!(error = %e, user_id = %auth.user.id, "role lookup failed");
        ApiError::Internal
    })?;
    Ok(Json(NavMenu::for_admin(is_admin)))
}
