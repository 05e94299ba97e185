//! Shared row model and view logic for the Wayfarer travel-booking app.
//!
//! This crate owns the JSON representation exchanged between `server` and
//! `cli`, plus the small pieces of client-side behavior both sides agree on:
//! destination search, booking totals, route guarding, and navigation menus.
//! It has no I/O of its own.

pub mod auth;
pub mod booking;
pub mod model;
pub mod nav;
pub mod search;

pub use auth::{AuthEvent, AuthEventKind, AuthState};
pub use booking::{BookingForm, FormError, NewBooking, compute_total};
pub use model::{
    Booking, BookingStatus, BookingWithDestination, Destination, DestinationSummary, PaymentMethod, Profile,
    ProfileUpdate, Role, SessionUser, UserRole,
};
pub use nav::{GuardOutcome, NavLink, NavVariant, Route};
pub use search::filter_destinations;

/// JSON error body returned by the server for every failed request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// Set when the client should navigate somewhere else, e.g. `/login`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}
