//! Routes, the route guard, and the navigation menus.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page runs [`guard`] before issuing queries; an
//! unauthenticated session is redirected to `/login`. After sign-in the role
//! lookup picks the landing page through [`landing_for`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthState;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Search,
    Destination(Uuid),
    Booking(Uuid),
    MyBookings,
    Profile,
    Admin,
    NotFound(String),
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::Login => "/login".into(),
            Self::Register => "/register".into(),
            Self::Dashboard => "/dashboard".into(),
            Self::Search => "/search".into(),
            Self::Destination(id) => format!("/destination/{id}"),
            Self::Booking(id) => format!("/booking/{id}"),
            Self::MyBookings => "/bookings".into(),
            Self::Profile => "/profile".into(),
            Self::Admin => "/admin".into(),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Resolve a path. Unknown paths fall through to `NotFound`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] | [""] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["dashboard"] => Self::Dashboard,
            ["search"] => Self::Search,
            ["bookings"] => Self::MyBookings,
            ["profile"] => Self::Profile,
            ["admin"] => Self::Admin,
            ["destination", id] => Uuid::parse_str(id).map_or_else(|_| Self::NotFound(path.to_owned()), Self::Destination),
            ["booking", id] => Uuid::parse_str(id).map_or_else(|_| Self::NotFound(path.to_owned()), Self::Booking),
            _ => Self::NotFound(path.to_owned()),
        }
    }

    /// Public pages are the landing page, sign-in, sign-up and the 404 page.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Home | Self::Login | Self::Register | Self::NotFound(_))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    /// Still waiting for the initial session lookup; render nothing yet.
    Pending,
    Redirect(Route),
}

/// Decide whether `route` may render for the current auth state.
#[must_use]
pub fn guard(route: &Route, auth: &AuthState) -> GuardOutcome {
    if !route.requires_auth() {
        return GuardOutcome::Allow;
    }
    if auth.loading {
        return GuardOutcome::Pending;
    }
    if auth.user.is_none() {
        return GuardOutcome::Redirect(Route::Login);
    }
    GuardOutcome::Allow
}

/// Post-login destination for a user.
#[must_use]
pub fn landing_for(is_admin: bool) -> Route {
    if is_admin { Route::Admin } else { Route::Dashboard }
}

// =============================================================================
// MENUS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavVariant {
    #[default]
    User,
    Admin,
}

impl NavVariant {
    #[must_use]
    pub fn for_admin(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::User }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub to: String,
    pub label: String,
}

impl NavLink {
    fn new(to: &str, label: &str) -> Self {
        Self { to: to.to_owned(), label: label.to_owned() }
    }
}

/// Bottom navigation bar entries.
#[must_use]
pub fn links(variant: NavVariant) -> Vec<NavLink> {
    match variant {
        NavVariant::User => vec![
            NavLink::new("/dashboard", "Home"),
            NavLink::new("/search", "Search"),
            NavLink::new("/bookings", "My Trips"),
            NavLink::new("/profile", "Profile"),
        ],
        NavVariant::Admin => vec![
            NavLink::new("/admin", "Dashboard"),
            NavLink::new("/admin/destinations", "Destinations"),
            NavLink::new("/admin/bookings", "Bookings"),
            NavLink::new("/profile", "Profile"),
        ],
    }
}

/// Dashboard category tiles. All of them open search.
#[must_use]
pub fn dashboard_categories() -> Vec<NavLink> {
    vec![
        NavLink::new("/search", "Flights"),
        NavLink::new("/search", "Hotels"),
        NavLink::new("/search", "Packages"),
    ]
}

/// Dashboard quick links.
#[must_use]
pub fn dashboard_quick_links() -> Vec<NavLink> {
    vec![
        NavLink::new("/bookings", "My Bookings"),
        NavLink::new("/search", "Top Destinations"),
        NavLink::new("/search", "Wishlist"),
    ]
}

/// Response body of `GET /api/nav`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavMenu {
    pub variant: NavVariant,
    pub landing: String,
    pub links: Vec<NavLink>,
}

impl NavMenu {
    #[must_use]
    pub fn for_admin(is_admin: bool) -> Self {
        let variant = NavVariant::for_admin(is_admin);
        Self { variant, landing: landing_for(is_admin).path(), links: links(variant) }
    }
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
