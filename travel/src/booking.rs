//! Booking form parsing and total computation.
//!
//! `BookingForm` mirrors the "Booking / Payment" page: every field arrives as
//! raw text. Parsing produces the `NewBooking` insert payload; the server adds
//! the user id, the computed total, and the `pending` status.

use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;
use uuid::Uuid;

use crate::model::PaymentMethod;

/// Total for a booking: price per traveler times the traveler count.
/// Absent when the destination has no price.
#[must_use]
pub fn compute_total(price: Option<f64>, number_of_travelers: i32) -> Option<f64> {
    price.map(|p| p * f64::from(number_of_travelers))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("number of travelers must be a whole number of at least 1")]
    InvalidTravelers,
    #[error("{field} must be a date in YYYY-MM-DD format")]
    InvalidDate { field: &'static str },
    #[error("check-out date must not be before check-in date")]
    CheckOutBeforeCheckIn,
    #[error("unknown payment method: {0}")]
    InvalidPaymentMethod(String),
}

/// Insert payload for `POST /api/bookings`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub destination_id: Uuid,
    pub traveler_name: String,
    #[serde(default)]
    pub traveler_age: Option<i32>,
    #[serde(default)]
    pub traveler_gender: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub number_of_travelers: i32,
    pub check_in_date: Date,
    pub check_out_date: Date,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl NewBooking {
    /// Checks the rules that do not need the store.
    ///
    /// # Errors
    ///
    /// Returns the first rule the payload violates.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.traveler_name.trim().is_empty() {
            return Err(FormError::Required("traveler name"));
        }
        if self.email.trim().is_empty() {
            return Err(FormError::Required("email"));
        }
        if self.number_of_travelers < 1 {
            return Err(FormError::InvalidTravelers);
        }
        if self.check_out_date < self.check_in_date {
            return Err(FormError::CheckOutBeforeCheckIn);
        }
        Ok(())
    }

    /// Number of nights between check-in and check-out.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).whole_days()
    }
}

/// Raw form input, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub traveler_name: String,
    pub age: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub number_of_travelers: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub payment_method: String,
}

impl BookingForm {
    /// A blank form with the page defaults: one traveler, UPI, and the
    /// signed-in user's email prefilled.
    #[must_use]
    pub fn new(session_email: &str) -> Self {
        Self {
            email: session_email.to_owned(),
            number_of_travelers: "1".to_owned(),
            payment_method: PaymentMethod::default().as_str().to_owned(),
            ..Self::default()
        }
    }

    /// Parse the form into an insert payload for `destination_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] naming the first invalid field.
    pub fn into_new_booking(self, destination_id: Uuid) -> Result<NewBooking, FormError> {
        let traveler_name = required(&self.traveler_name, "traveler name")?;
        let email = required(&self.email, "email")?;
        let number_of_travelers = self
            .number_of_travelers
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(FormError::InvalidTravelers)?;
        let check_in_date = parse_date(&self.check_in_date, "check-in date")?;
        let check_out_date = parse_date(&self.check_out_date, "check-out date")?;
        let payment_method = if self.payment_method.trim().is_empty() {
            PaymentMethod::default()
        } else {
            PaymentMethod::parse(&self.payment_method)
                .ok_or_else(|| FormError::InvalidPaymentMethod(self.payment_method.trim().to_owned()))?
        };

        let booking = NewBooking {
            destination_id,
            traveler_name,
            // Age is optional; text that is not a number is dropped.
            traveler_age: self.age.trim().parse::<i32>().ok(),
            traveler_gender: optional(&self.gender),
            email,
            phone: optional(&self.phone),
            number_of_travelers,
            check_in_date,
            check_out_date,
            payment_method,
        };
        booking.validate()?;
        Ok(booking)
    }
}

fn required(raw: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(trimmed.to_owned())
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Parse an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`FormError::Required`] for blank input and
/// [`FormError::InvalidDate`] for anything else that does not parse.
pub fn parse_date(raw: &str, field: &'static str) -> Result<Date, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required(field));
    }
    Date::parse(trimmed, format_description!("[year]-[month]-[day]")).map_err(|_| FormError::InvalidDate { field })
}

#[cfg(test)]
#[path = "booking_test.rs"]
mod tests;
