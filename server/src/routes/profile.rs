//! Profile routes.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use travel::{AuthEvent, Profile, ProfileUpdate, Role};

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::services::{profiles, roles};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub roles: Vec<Role>,
    pub is_admin: bool,
}

/// `GET /api/profile`
pub async fn get(State(state): State<AppState>, auth: AuthUser) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = profiles::get_profile(&state.pool, auth.user.id).await?;
    let roles: Vec<Role> = roles::roles_for(&state.pool, auth.user.id)
        .await
        .map_err(profiles::ProfileError::from)?
        .into_iter()
        .map(|r| r.role)
        .collect();
    let is_admin = roles.contains(&Role::Admin);
    Ok(Json(ProfileResponse { profile, roles, is_admin }))
}

/// `PATCH /api/profile`: absent fields keep their value, empty strings clear.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<Profile>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("nothing to update".to_owned()));
    }
    let profile = profiles::update_profile(&state.pool, auth.user.id, &body).await?;

    state.events.publish(AuthEvent::profile_updated(auth.user.id));
    tracing::info!(user_id = %auth.user.id, "profile updated");
    Ok(Json(profile))
}
