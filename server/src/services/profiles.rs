//! `profiles` rows: the user's editable contact record.

use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Row};
use travel::{Profile, ProfileUpdate};
use uuid::Uuid;

use super::auth::normalize_email;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile not found: {0}")]
    NotFound(Uuid),
    #[error("invalid email")]
    InvalidEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn row_to_profile(r: &PgRow) -> Profile {
    Profile {
        user_id: r.get("user_id"),
        full_name: r.get("full_name"),
        email: r.get("email"),
        phone: r.get("phone"),
        updated_at: r.get("updated_at"),
    }
}

/// Insert the profile created alongside a new account.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_profile<'e, E>(
    executor: E,
    user_id: Uuid,
    email: &str,
    full_name: Option<&str>,
) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query("INSERT INTO profiles (user_id, email, full_name) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(email)
        .bind(full_name)
        .execute(executor)
        .await?;
    Ok(())
}

/// Fetch the user's profile.
///
/// # Errors
///
/// Returns `NotFound` if the user has no profile row.
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Profile, ProfileError> {
    let row = sqlx::query("SELECT user_id, full_name, email, phone, updated_at FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ProfileError::NotFound(user_id))?;
    Ok(row_to_profile(&row))
}

/// Normalize an update: trims values and checks a non-empty email.
/// An empty string clears the field.
///
/// # Errors
///
/// Returns `InvalidEmail` when a non-empty email does not look like one.
pub fn prepare_update(update: &ProfileUpdate) -> Result<ProfileUpdate, ProfileError> {
    let email = match update.email.as_deref().map(str::trim) {
        Some("") => Some(String::new()),
        Some(raw) => Some(normalize_email(raw).ok_or(ProfileError::InvalidEmail)?),
        None => None,
    };
    Ok(ProfileUpdate {
        full_name: update.full_name.as_deref().map(|s| s.trim().to_owned()),
        email,
        phone: update.phone.as_deref().map(|s| s.trim().to_owned()),
    })
}

/// Update the user's own profile. Fields absent from `update` are kept.
///
/// # Errors
///
/// Returns `InvalidEmail`, `NotFound`, or a database error.
pub async fn update_profile(pool: &PgPool, user_id: Uuid, update: &ProfileUpdate) -> Result<Profile, ProfileError> {
    let update = prepare_update(update)?;
    let row = sqlx::query(
        r"UPDATE profiles
          SET full_name = COALESCE($2, full_name),
              email = COALESCE($3, email),
              phone = COALESCE($4, phone),
              updated_at = now()
          WHERE user_id = $1
          RETURNING user_id, full_name, email, phone, updated_at",
    )
    .bind(user_id)
    .bind(update.full_name.as_deref())
    .bind(update.email.as_deref())
    .bind(update.phone.as_deref())
    .fetch_optional(pool)
    .await?
    .ok_or(ProfileError::NotFound(user_id))?;

    tracing::info!(%user_id, "profile updated");
    Ok(row_to_profile(&row))
}

#[cfg(test)]
#[path = "profiles_test.rs"]
mod tests;
