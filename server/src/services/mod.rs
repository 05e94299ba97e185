//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own persistence concerns so route handlers can stay
//! focused on request translation and auth plumbing. Each table gets its own
//! module; `auth`, `session` and `events` together play the managed-auth role.

pub mod auth;
pub mod bookings;
pub mod destinations;
pub mod events;
pub mod profiles;
pub mod roles;
pub mod session;
