//! Booking routes. Every read and write is scoped to the signed-in user.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use travel::{Booking, BookingWithDestination, NewBooking};
use uuid::Uuid;

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::services::bookings;
use crate::state::AppState;

/// `POST /api/bookings`: record a pending booking.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let booking = bookings::create_booking(&state.pool, auth.user.id, &body).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// `GET /api/bookings`: the user's bookings, newest first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<BookingWithDestination>>, ApiError> {
    Ok(Json(bookings::list_bookings_for_user(&state.pool, auth.user.id).await?))
}

/// `GET /api/bookings/{id}`
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingWithDestination>, ApiError> {
    Ok(Json(bookings::get_booking_for_user(&state.pool, auth.user.id, id).await?))
}
