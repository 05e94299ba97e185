//! `bookings` rows.
//!
//! DESIGN
//! ======
//! "Pay Now" only records intent: the row is written with status `pending`
//! and the total is the destination price times the traveler count. No
//! availability check, payment capture, or status transition happens here;
//! the status column is owned by whoever runs the store.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use travel::booking::FormError;
use travel::{Booking, BookingStatus, BookingWithDestination, DestinationSummary, NewBooking, PaymentMethod};
use uuid::Uuid;

const BOOKING_COLUMNS: &str = "b.id, b.user_id, b.destination_id, b.traveler_name, b.traveler_age, \
     b.traveler_gender, b.email, b.phone, b.number_of_travelers, b.check_in_date, b.check_out_date, \
     b.payment_method, b.total_amount, b.status, b.created_at";

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("booking not found: {0}")]
    NotFound(Uuid),
    #[error("destination not found: {0}")]
    DestinationNotFound(Uuid),
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error("unreadable booking row: {0}")]
    CorruptRow(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn row_to_booking(r: &PgRow) -> Result<Booking, BookingError> {
    let status: String = r.get("status");
    let status = BookingStatus::parse(&status).ok_or_else(|| BookingError::CorruptRow(format!("status {status}")))?;
    let payment: String = r.get("payment_method");
    let payment_method =
        PaymentMethod::parse(&payment).ok_or_else(|| BookingError::CorruptRow(format!("payment method {payment}")))?;

    Ok(Booking {
        id: r.get("id"),
        user_id: r.get("user_id"),
        destination_id: r.get("destination_id"),
        traveler_name: r.get("traveler_name"),
        traveler_age: r.get("traveler_age"),
        traveler_gender: r.get("traveler_gender"),
        email: r.get("email"),
        phone: r.get("phone"),
        number_of_travelers: r.get("number_of_travelers"),
        check_in_date: r.get("check_in_date"),
        check_out_date: r.get("check_out_date"),
        payment_method,
        total_amount: r.get("total_amount"),
        status,
        created_at: r.get("created_at"),
    })
}

fn row_to_listed_booking(r: &PgRow) -> Result<BookingWithDestination, BookingError> {
    let booking = row_to_booking(r)?;
    let name: Option<String> = r.get("destination_name");
    let destinations = name.map(|name| DestinationSummary {
        name,
        location: r.get("destination_location"),
        image_url: r.get("destination_image_url"),
    });
    Ok(BookingWithDestination { booking, destinations })
}

/// Record a pending booking for `user_id`.
///
/// # Errors
///
/// Returns `Invalid` for a payload that breaks the form rules,
/// `DestinationNotFound` for an unknown destination, or a database error.
pub async fn create_booking(pool: &PgPool, user_id: Uuid, new: &NewBooking) -> Result<Booking, BookingError> {
    new.validate()?;

    let price = sqlx::query_scalar::<_, Option<f64>>("SELECT price FROM destinations WHERE id = $1")
        .bind(new.destination_id)
        .fetch_optional(pool)
        .await?
        .ok_or(BookingError::DestinationNotFound(new.destination_id))?;
    let total_amount = travel::compute_total(price, new.number_of_travelers);

    let sql = format!(
        r"INSERT INTO bookings AS b (
              user_id, destination_id, traveler_name, traveler_age, traveler_gender, email, phone,
              number_of_travelers, check_in_date, check_out_date, payment_method, total_amount, status
          )
          VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
          RETURNING {BOOKING_COLUMNS}"
    );
    let row = sqlx::query(&sql)
        .bind(user_id)
        .bind(new.destination_id)
        .bind(new.traveler_name.trim())
        .bind(new.traveler_age)
        .bind(new.traveler_gender.as_deref())
        .bind(new.email.trim())
        .bind(new.phone.as_deref())
        .bind(new.number_of_travelers)
        .bind(new.check_in_date)
        .bind(new.check_out_date)
        .bind(new.payment_method.as_str())
        .bind(total_amount)
        .bind(BookingStatus::Pending.as_str())
        .fetch_one(pool)
        .await?;

    let booking = row_to_booking(&row)?;
    tracing::info!(
        booking_id = %booking.id,
        %user_id,
        destination_id = %booking.destination_id,
        travelers = booking.number_of_travelers,
        "booking created"
    );
    Ok(booking)
}

/// The user's bookings with their destinations, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_bookings_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<BookingWithDestination>, BookingError> {
    let sql = format!(
        r"SELECT {BOOKING_COLUMNS},
                 d.name AS destination_name,
                 d.location AS destination_location,
                 d.image_url AS destination_image_url
          FROM bookings b
          LEFT JOIN destinations d ON d.id = b.destination_id
          WHERE b.user_id = $1
          ORDER BY b.created_at DESC"
    );
    let rows = sqlx::query(&sql).bind(user_id).fetch_all(pool).await?;
    rows.iter().map(row_to_listed_booking).collect()
}

/// One of the user's bookings. Other users' bookings read as not found.
///
/// # Errors
///
/// Returns `NotFound` or a database error.
pub async fn get_booking_for_user(
    pool: &PgPool,
    user_id: Uuid,
    booking_id: Uuid,
) -> Result<BookingWithDestination, BookingError> {
    let sql = format!(
        r"SELECT {BOOKING_COLUMNS},
                 d.name AS destination_name,
                 d.location AS destination_location,
                 d.image_url AS destination_image_url
          FROM bookings b
          LEFT JOIN destinations d ON d.id = b.destination_id
          WHERE b.id = $1 AND b.user_id = $2"
    );
    let row = sqlx::query(&sql)
        .bind(booking_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(BookingError::NotFound(booking_id))?;
    row_to_listed_booking(&row)
}

#[cfg(all(test, feature = "live-db-tests"))]
#[path = "bookings_test.rs"]
mod tests;
