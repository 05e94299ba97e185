//! Row types for the four tables the app reads and writes.
//!
//! Field names match the column names, so the JSON produced by the server is
//! the row itself. Invariants such as uniqueness and the allowed status values
//! live in the store; these types only describe the shape.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

// =============================================================================
// DESTINATIONS
// =============================================================================

/// A bookable location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub rating: f64,
    pub total_reviews: i32,
    /// Price per traveler. Some destinations are listed without one.
    pub price: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Destination {
    /// Placeholder shown when a destination has no image: its first letter.
    #[must_use]
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// The `destinations(name, location, image_url)` selection embedded in a booking listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationSummary {
    pub name: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

// =============================================================================
// BOOKINGS
// =============================================================================

/// Booking lifecycle value. Only `Pending` is ever written by this codebase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether the "Modify booking" action is offered.
    #[must_use]
    pub fn is_modifiable(self) -> bool {
        self == Self::Pending
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the traveler intends to pay. No payment is actually taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    Wallet,
}

impl PaymentMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upi => "upi",
            Self::Card => "card",
            Self::Wallet => "wallet",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "upi" => Some(Self::Upi),
            "card" => Some(Self::Card),
            "wallet" => Some(Self::Wallet),
            _ => None,
        }
    }

    /// Label shown next to the radio option.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Card => "Credit/Debit card",
            Self::Wallet => "Wallets",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored reservation row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub destination_id: Uuid,
    pub traveler_name: String,
    pub traveler_age: Option<i32>,
    pub traveler_gender: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub number_of_travelers: i32,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub payment_method: PaymentMethod,
    pub total_amount: Option<f64>,
    pub status: BookingStatus,
    pub created_at: OffsetDateTime,
}

/// A booking with its destination joined in, as listed on "My Bookings".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingWithDestination {
    #[serde(flatten)]
    pub booking: Booking,
    /// Absent when the destination row has been removed.
    pub destinations: Option<DestinationSummary>,
}

// =============================================================================
// PROFILES & ROLES
// =============================================================================

/// Editable contact record, separate from the auth identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub updated_at: OffsetDateTime,
}

impl Profile {
    /// Avatar letter: full name first, then email, then `U`.
    #[must_use]
    pub fn initial(&self) -> char {
        [self.full_name.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|s| s.chars().next())
            .unwrap_or('U')
    }

    /// A profile counts as verified once it carries an email.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Partial profile update. Omitted fields keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: Uuid,
    pub role: Role,
}

/// The authenticated identity behind a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
