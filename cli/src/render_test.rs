use super::*;
use time::OffsetDateTime;
use time::macros::date;
use travel::nav::NavVariant;
use travel::{Booking, BookingStatus, DestinationSummary, PaymentMethod};
use uuid::Uuid;

fn destination(price: Option<f64>) -> Destination {
    Destination {
        id: Uuid::nil(),
        name: "Goa".into(),
        location: Some("India".into()),
        description: None,
        rating: 4.8,
        total_reviews: 120,
        price,
        amenities: vec!["Beach".into(), "WiFi".into()],
        image_url: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

fn booking(status: BookingStatus, total: Option<f64>) -> BookingWithDestination {
    BookingWithDestination {
        booking: Booking {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            destination_id: Uuid::nil(),
            traveler_name: "Asha".into(),
            traveler_age: None,
            traveler_gender: None,
            email: "asha@example.com".into(),
            phone: None,
            number_of_travelers: 2,
            check_in_date: date!(2030 - 01 - 10),
            check_out_date: date!(2030 - 01 - 12),
            payment_method: PaymentMethod::Upi,
            total_amount: total,
            status,
            created_at: OffsetDateTime::UNIX_EPOCH,
        },
        destinations: Some(DestinationSummary { name: "Goa".into(), location: Some("India".into()), image_url: None }),
    }
}

// =============================================================================
// amounts
// =============================================================================

#[test]
fn amount_groups_thousands() {
    assert_eq!(amount(12000.0), "₹12,000");
    assert_eq!(amount(1_234_567.0), "₹1,234,567");
    assert_eq!(amount(999.0), "₹999");
}

#[test]
fn amount_keeps_fractional_paise() {
    assert_eq!(amount(1500.5), "₹1,500.50");
}

#[test]
fn amount_zero() {
    assert_eq!(amount(0.0), "₹0");
}

#[test]
fn unpriced_destination_shows_call_to_action() {
    assert_eq!(price_label(None), "Book Now");
    assert_eq!(price_label(Some(5000.0)), "₹5,000");
}

// =============================================================================
// pages
// =============================================================================

#[test]
fn destination_line_has_name_location_rating_and_price() {
    let line = destination_line(&destination(Some(8000.0)));
    assert!(line.contains("Goa (India)"));
    assert!(line.contains("★ 4.8"));
    assert!(line.ends_with("₹8,000"));
}

#[test]
fn destination_detail_falls_back_to_default_description() {
    let page = destination_detail(&destination(None));
    assert!(page.contains(DEFAULT_DESCRIPTION));
    assert!(page.contains("(120 reviews)"));
    assert!(page.contains("Amenities: Beach, WiFi"));
    assert!(page.ends_with("Price: Book Now"));
}

#[test]
fn pending_booking_is_marked_modifiable() {
    let entry = booking_entry(&booking(BookingStatus::Pending, Some(16000.0)));
    assert!(entry.starts_with("Goa  [pending]"));
    assert!(entry.contains("2030-01-10 - 2030-01-12"));
    assert!(entry.contains("2 Guests  UPI"));
    assert!(entry.contains("Total: ₹16,000"));
    assert!(entry.contains("(modifiable)"));
}

#[test]
fn confirmed_booking_without_total() {
    let entry = booking_entry(&booking(BookingStatus::Confirmed, None));
    assert!(!entry.contains("Total"));
    assert!(!entry.contains("(modifiable)"));
}

#[test]
fn booking_without_destination_uses_placeholder_name() {
    let mut b = booking(BookingStatus::Cancelled, None);
    b.destinations = None;
    assert!(booking_entry(&b).starts_with("Destination  [cancelled]"));
}

#[test]
fn profile_shows_verified_badge_and_admin_link() {
    let p = Profile {
        user_id: Uuid::nil(),
        full_name: Some("Asha Rao".into()),
        email: Some("asha@example.com".into()),
        phone: None,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    };
    let page = profile(&p, "login@example.com", true);
    assert!(page.contains("Email:     asha@example.com"));
    assert!(page.starts_with("(A) Asha Rao  [verified]"));
    assert!(page.ends_with("Admin dashboard: /admin"));
}

#[test]
fn profile_without_name_or_email() {
    let p = Profile { user_id: Uuid::nil(), full_name: None, email: None, phone: None, updated_at: OffsetDateTime::UNIX_EPOCH };
    let page = profile(&p, "login@example.com", false);
    assert!(page.starts_with("(U) User\n"));
    assert!(page.contains("Email:     login@example.com"));
    assert!(!page.contains("Admin"));
}

#[test]
fn nav_menu_lists_landing_and_links() {
    let menu = NavMenu::for_admin(false);
    let text = nav_menu(&menu);
    assert!(text.starts_with("Home: /dashboard"));
    assert!(text.contains("/bookings"));
    assert!(text.contains("My Trips"));
    assert_eq!(menu.variant, NavVariant::User);
}

#[test]
fn profile_with_blank_email_uses_session_email() {
    let p = Profile {
        user_id: Uuid::nil(),
        full_name: Some("Asha".into()),
        email: Some(String::new()),
        phone: None,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    };
    assert!(profile(&p, "login@example.com", false).contains("Email:     login@example.com"));
}
