//! Email + password accounts: sign-up, sign-in, password hashing.
//!
//! DESIGN
//! ======
//! Passwords are stored as `sha256$<rounds>$<salt>$<digest>`: a random
//! 16-byte salt and an iterated SHA-256 digest. Sign-up creates the user, its
//! profile, and the default `user` role in one transaction.
//!
//! Sign-in failures for unknown emails and wrong passwords share one message
//! so the response does not reveal which accounts exist.

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use travel::{Role, SessionUser};
use uuid::Uuid;

use super::session::bytes_to_hex;
use super::{profiles, roles};

pub const MIN_PASSWORD_LEN: usize = 6;
const HASH_SCHEME: &str = "sha256";
const HASH_ROUNDS: u32 = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    WeakPassword,
    #[error("User already registered")]
    AlreadyRegistered,
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

// =============================================================================
// PASSWORD HASHING
// =============================================================================

#[must_use]
pub fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes_to_hex(&bytes)
}

fn digest(salt: &str, password: &str, rounds: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let mut out = hasher.finalize();
    for _ in 1..rounds {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(out);
        out = hasher.finalize();
    }
    bytes_to_hex(&out)
}

/// Hash `password` with `salt` into the stored representation.
#[must_use]
pub fn hash_password(password: &str, salt: &str) -> String {
    format!("{HASH_SCHEME}${HASH_ROUNDS}${salt}${}", digest(salt, password, HASH_ROUNDS))
}

/// Check `password` against a stored hash. Malformed hashes never verify.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(rounds), Some(salt), Some(expected), None) =
        (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != HASH_SCHEME {
        return false;
    }
    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    if rounds == 0 {
        return false;
    }
    constant_time_eq(digest(salt, password, rounds).as_bytes(), expected.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

// =============================================================================
// ACCOUNTS
// =============================================================================

/// Create an account with its profile and default role.
///
/// # Errors
///
/// Returns `InvalidEmail`, `WeakPassword`, `AlreadyRegistered`, or a database error.
pub async fn sign_up(
    pool: &PgPool,
    email: &str,
    password: &str,
    full_name: Option<&str>,
) -> Result<SessionUser, AuthError> {
    let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword);
    }
    let password_hash = hash_password(password, &generate_salt());

    let mut tx = pool.begin().await?;
    let row = sqlx::query(
        r"INSERT INTO users (email, password_hash)
          VALUES ($1, $2)
          ON CONFLICT (email) DO NOTHING
          RETURNING id",
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        return Err(AuthError::AlreadyRegistered);
    };
    let user_id: Uuid = row.get("id");

    let full_name = full_name.map(str::trim).filter(|n| !n.is_empty());
    profiles::create_profile(&mut *tx, user_id, &email, full_name).await?;
    roles::grant_role(&mut *tx, user_id, Role::User).await?;
    tx.commit().await?;

    tracing::info!(%user_id, "account created");
    Ok(SessionUser { id: user_id, email })
}

/// Verify an email + password pair.
///
/// # Errors
///
/// Returns `InvalidCredentials` for an unknown email or wrong password.
pub async fn sign_in(pool: &PgPool, email: &str, password: &str) -> Result<SessionUser, AuthError> {
    let Some(email) = normalize_email(email) else {
        return Err(AuthError::InvalidCredentials);
    };

    let row = sqlx::query("SELECT id, password_hash FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let stored: String = row.get("password_hash");
    if !verify_password(password, &stored) {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(SessionUser { id: row.get("id"), email })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
