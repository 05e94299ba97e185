//! HTTP error type shared by all route handlers.
//!
//! Service errors carry their own `thiserror` enums; handlers convert them
//! into [`ApiError`], which renders `{"error": "..."}` with a matching status.
//! Messages pass through to the user unchanged, except database failures,
//! which are logged and reported generically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use travel::ErrorBody;
use travel::booking::FormError;

use crate::services::auth::AuthError;
use crate::services::bookings::BookingError;
use crate::services::destinations::DestinationError;
use crate::services::profiles::ProfileError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("an unexpected error occurred")]
    Internal,
}

impl ApiError {
    /// Rejection for requests without a valid session.
    #[must_use]
    pub fn login_required() -> Self {
        Self::Unauthorized("Please login to continue".to_owned())
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn database(err: &sqlx::Error) -> Self {
        tracing::error!(error = %err, "database error");
        Self::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let redirect = matches!(self, Self::Unauthorized(_)).then(|| "/login".to_owned());
        let body = ErrorBody { error: self.to_string(), redirect };
        (self.status(), Json(body)).into_response()
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail | AuthError::WeakPassword => Self::BadRequest(err.to_string()),
            AuthError::AlreadyRegistered => Self::Conflict(err.to_string()),
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AuthError::Db(e) => Self::database(&e),
        }
    }
}

impl From<DestinationError> for ApiError {
    fn from(err: DestinationError) -> Self {
        match err {
            DestinationError::NotFound(_) => Self::NotFound("Destination not found".to_owned()),
            DestinationError::Database(e) => Self::database(&e),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(_) => Self::NotFound("Booking not found".to_owned()),
            BookingError::DestinationNotFound(_) => Self::NotFound("Destination not found".to_owned()),
            BookingError::Invalid(e) => e.into(),
            BookingError::CorruptRow(msg) => {
                tracing::error!(%msg, "unreadable booking row");
                Self::Internal
            }
            BookingError::Database(e) => Self::database(&e),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound(_) => Self::NotFound("Profile not found".to_owned()),
            ProfileError::InvalidEmail => Self::BadRequest(err.to_string()),
            ProfileError::Database(e) => Self::database(&e),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
