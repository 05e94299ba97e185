//! `user_roles` lookups.
//!
//! Roles only branch navigation: admins land on `/admin`, everyone else on
//! `/dashboard`. Nothing here gates data access.

use sqlx::{PgExecutor, PgPool, Row};
use travel::{Role, UserRole};
use uuid::Uuid;

/// Whether the user holds the `admin` role.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn is_admin(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT role FROM user_roles WHERE user_id = $1 AND role = 'admin'")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// The user's `user_roles` rows. Unknown role strings are skipped.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn roles_for(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserRole>, sqlx::Error> {
    let rows = sqlx::query("SELECT user_id, role FROM user_roles WHERE user_id = $1 ORDER BY role")
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .filter_map(|r| {
            let role = Role::parse(r.get::<&str, _>("role"))?;
            Some(UserRole { user_id: r.get("user_id"), role })
        })
        .collect())
}

/// Grant a role. Granting a role the user already holds is a no-op.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn grant_role<'e, E>(executor: E, user_id: Uuid, role: Role) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2) ON CONFLICT DO NOTHING")
        .bind(user_id)
        .bind(role.as_str())
        .execute(executor)
        .await?;
    Ok(())
}
