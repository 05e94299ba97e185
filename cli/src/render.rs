//! Plain-text rendering of API payloads, one function per page section.

use std::fmt::Write;

use travel::nav::{NavLink, NavMenu};
use travel::{BookingWithDestination, Destination, Profile};

const DEFAULT_DESCRIPTION: &str = "Discover this amazing destination and create unforgettable memories.";

/// Rupee amount with thousands separators; whole amounts print without
/// decimals.
#[must_use]
pub fn amount(value: f64) -> String {
    let cents = (value * 100.0).round();
    #[allow(clippy::cast_possible_truncation)]
    let cents = cents as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("{sign}₹{whole}"),
        frac => format!("{sign}₹{whole}.{frac:02}"),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Price label for listings. Unpriced destinations show a call to action.
#[must_use]
pub fn price_label(price: Option<f64>) -> String {
    price.map_or_else(|| "Book Now".to_owned(), amount)
}

/// One-line search result.
#[must_use]
pub fn destination_line(d: &Destination) -> String {
    let location = d.location.as_deref().unwrap_or("-");
    format!("{}  {} ({location})  ★ {:.1}  {}", d.id, d.name, d.rating, price_label(d.price))
}

/// The destination detail page.
#[must_use]
pub fn destination_detail(d: &Destination) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", d.name);
    if let Some(location) = &d.location {
        let _ = writeln!(out, "  {location}");
    }
    let _ = writeln!(out, "  ★ {:.1} ({} reviews)", d.rating, d.total_reviews);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", d.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION));
    let _ = writeln!(out);
    if d.amenities.is_empty() {
        let _ = writeln!(out, "Amenities: none listed");
    } else {
        let _ = writeln!(out, "Amenities: {}", d.amenities.join(", "));
    }
    let _ = write!(out, "Price: {}", price_label(d.price));
    out
}

/// One entry on the "My Trips" page.
#[must_use]
pub fn booking_entry(b: &BookingWithDestination) -> String {
    let booking = &b.booking;
    let name = b.destinations.as_ref().map_or("Destination", |d| d.name.as_str());
    let location = b.destinations.as_ref().and_then(|d| d.location.as_deref()).unwrap_or("");
    let mut out = String::new();
    let _ = writeln!(out, "{name}  [{}]", booking.status);
    if !location.is_empty() {
        let _ = writeln!(out, "  {location}");
    }
    let _ = writeln!(out, "  {} - {}", booking.check_in_date, booking.check_out_date);
    let _ = writeln!(out, "  {} Guests  {}", booking.number_of_travelers, booking.payment_method.label());
    if let Some(total) = booking.total_amount {
        let _ = writeln!(out, "  Total: {}", amount(total));
    }
    if booking.status.is_modifiable() {
        let _ = writeln!(out, "  (modifiable)");
    }
    let _ = write!(out, "  id: {}", booking.id);
    out
}

/// The profile page header and contact fields. An empty profile email shows
/// the sign-in email instead.
#[must_use]
pub fn profile(p: &Profile, session_email: &str, is_admin: bool) -> String {
    let mut out = String::new();
    let name = p.full_name.as_deref().filter(|n| !n.is_empty()).unwrap_or("User");
    let badge = if p.is_verified() { "  [verified]" } else { "" };
    let _ = writeln!(out, "({}) {name}{badge}", p.initial());
    let _ = writeln!(out, "  Full name: {}", p.full_name.as_deref().unwrap_or(""));
    let email = p.email.as_deref().filter(|e| !e.is_empty()).unwrap_or(session_email);
    let _ = writeln!(out, "  Email:     {email}");
    let _ = write!(out, "  Phone:     {}", p.phone.as_deref().unwrap_or(""));
    if is_admin {
        let _ = write!(out, "\n  Admin dashboard: {}", travel::Route::Admin);
    }
    out
}

/// A list of links, one per line.
#[must_use]
pub fn links(links: &[NavLink]) -> String {
    links
        .iter()
        .map(|l| format!("  {:<22} {}", l.to, l.label))
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn nav_menu(menu: &NavMenu) -> String {
    format!("Home: {}\n{}", menu.landing, links(&menu.links))
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
