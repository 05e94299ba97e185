use super::*;
use time::macros::date;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use travel::PaymentMethod;

fn ctx(base_url: &str) -> CliContext {
    CliContext {
        base_url: base_url.to_owned(),
        session_file: PathBuf::from(".wayfarer-session"),
        http: reqwest::Client::new(),
    }
}

/// Serve one canned HTTP reply on a local port; returns the base URL.
async fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        let reply = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
    });
    format!("http://{addr}")
}

async fn saved_session() -> (PathBuf, StoredSession) {
    let path = std::env::temp_dir().join(format!("wayfarer-session-{}.json", Uuid::new_v4()));
    let stored = StoredSession {
        token: "ab".repeat(32),
        user: SessionUser { id: Uuid::new_v4(), email: "asha@example.com".into() },
        landing: Some("/dashboard".into()),
        session_id: None,
    };
    session::save(&path, &stored).await.unwrap();
    (path, stored)
}

fn book_args(argv: &[&str]) -> BookArgs {
    let mut full = vec!["wayfarer", "book"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).unwrap().command {
        Command::Book(args) => args,
        other => panic!("expected book, got {other:?}"),
    }
}

// =============================================================================
// argument parsing
// =============================================================================

#[test]
fn search_query_is_optional() {
    let cli = Cli::try_parse_from(["wayfarer", "search"]).unwrap();
    assert!(matches!(cli.command, Command::Search { query: None }));

    let cli = Cli::try_parse_from(["wayfarer", "search", "goa"]).unwrap();
    assert!(matches!(cli.command, Command::Search { query: Some(ref q) } if q == "goa"));
}

#[test]
fn destination_requires_uuid() {
    assert!(Cli::try_parse_from(["wayfarer", "destination", "not-a-uuid"]).is_err());
}

#[test]
fn profile_update_flags_parse() {
    let cli = Cli::try_parse_from(["wayfarer", "profile", "update", "--phone", "555"]).unwrap();
    let Command::Profile(ProfileCommand { command: ProfileSubcommand::Update { full_name, email, phone } }) = cli.command
    else {
        panic!("expected profile update");
    };
    assert_eq!((full_name, email, phone.as_deref()), (None, None, Some("555")));
}

// =============================================================================
// booking form
// =============================================================================

#[test]
fn booking_form_uses_page_defaults() {
    let id = Uuid::new_v4();
    let id_arg = id.to_string();
    let args = book_args(&[id_arg.as_str(), "--name", "Asha", "--check-in", "2030-01-10", "--check-out", "2030-01-12"]);
    let new_booking = booking_form(args, "asha@example.com").into_new_booking(id).unwrap();
    assert_eq!(new_booking.email, "asha@example.com");
    assert_eq!(new_booking.number_of_travelers, 1);
    assert_eq!(new_booking.payment_method, PaymentMethod::Upi);
    assert_eq!(new_booking.check_in_date, date!(2030 - 01 - 10));
}

#[test]
fn booking_form_flags_override_defaults() {
    let id = Uuid::new_v4();
    let id_arg = id.to_string();
    let args = book_args(&[
        id_arg.as_str(),
        "--name",
        "Asha",
        "--email",
        "other@example.com",
        "--travelers",
        "3",
        "--payment",
        "wallet",
        "--age",
        "abc",
        "--check-in",
        "2030-01-10",
        "--check-out",
        "2030-01-12",
    ]);
    let new_booking = booking_form(args, "asha@example.com").into_new_booking(id).unwrap();
    assert_eq!(new_booking.email, "other@example.com");
    assert_eq!(new_booking.number_of_travelers, 3);
    assert_eq!(new_booking.payment_method, PaymentMethod::Wallet);
    assert_eq!(new_booking.traveler_age, None);
}

#[test]
fn booking_form_rejects_zero_travelers() {
    let id = Uuid::new_v4();
    let id_arg = id.to_string();
    let args = book_args(&[
        id_arg.as_str(),
        "--name",
        "Asha",
        "--travelers",
        "0",
        "--check-in",
        "2030-01-10",
        "--check-out",
        "2030-01-12",
    ]);
    let err = booking_form(args, "asha@example.com").into_new_booking(id).unwrap_err();
    assert_eq!(err, FormError::InvalidTravelers);
}

// =============================================================================
// errors
// =============================================================================

#[test]
fn invalid_credentials_get_friendly_message() {
    let err = login_error(CliError::Server { status: 401, message: INVALID_CREDENTIALS.to_owned() });
    assert_eq!(err.to_string(), "Invalid email or password");
}

#[test]
fn other_login_errors_pass_through() {
    let err = login_error(CliError::Server { status: 400, message: "invalid email".to_owned() });
    assert_eq!(err.to_string(), "invalid email");
}

#[test]
fn server_error_uses_body_message() {
    let body = ErrorBody { error: "Destination not found".into(), redirect: None };
    let err = server_error(StatusCode::NOT_FOUND, Some(body));
    assert!(matches!(err, CliError::Server { status: 404, ref message } if message == "Destination not found"));
}

#[test]
fn server_error_without_body_uses_reason() {
    let err = server_error(StatusCode::INTERNAL_SERVER_ERROR, None);
    assert_eq!(err.to_string(), "Internal Server Error");
}

#[test]
fn login_required_names_redirect() {
    let err = CliError::LoginRequired { redirect: "/login".into() };
    assert_eq!(err.to_string(), "Please login to continue (redirect: /login)");
}

#[test]
fn url_joins_without_double_slash() {
    assert_eq!(ctx("http://localhost:3000/").url("/api/nav"), "http://localhost:3000/api/nav");
    assert_eq!(ctx("http://localhost:3000").url("/healthz"), "http://localhost:3000/healthz");
}

// =============================================================================
// stored session on server replies
// =============================================================================

#[tokio::test]
async fn unauthorized_reply_clears_stored_session() {
    let base_url = serve_once("401 Unauthorized", r#"{"error":"Please login to continue","redirect":"/login"}"#.into()).await;
    let (path, stored) = saved_session().await;
    let ctx = CliContext { base_url, session_file: path.clone(), http: reqwest::Client::new() };

    let err = ctx.get::<Value>("/api/bookings", &stored.token).await.unwrap_err();
    assert!(matches!(err, CliError::LoginRequired { ref redirect } if redirect == "/login"));
    assert!(!path.exists());
    assert_eq!(session::load(&path).await, None);
}

#[tokio::test]
async fn other_server_errors_keep_stored_session() {
    let base_url = serve_once("404 Not Found", r#"{"error":"Destination not found"}"#.into()).await;
    let (path, stored) = saved_session().await;
    let ctx = CliContext { base_url, session_file: path.clone(), http: reqwest::Client::new() };

    let err = ctx.get::<Value>("/api/destinations/x", &stored.token).await.unwrap_err();
    assert!(matches!(err, CliError::Server { status: 404, .. }));
    assert_eq!(session::load(&path).await, Some(stored));
    session::clear(&path).await.unwrap();
}

#[tokio::test]
async fn profile_page_keeps_admin_link_from_server() {
    let profile = Profile {
        user_id: Uuid::nil(),
        full_name: Some("Asha".into()),
        email: Some(String::new()),
        phone: None,
        updated_at: time::OffsetDateTime::UNIX_EPOCH,
    };
    let body = json!({ "profile": profile, "roles": ["user", "admin"], "is_admin": true });
    let base_url = serve_once("200 OK", body.to_string()).await;
    let (path, stored) = saved_session().await;
    let ctx = CliContext { base_url, session_file: path.clone(), http: reqwest::Client::new() };

    let page = profile_page(&ctx, &stored).await.unwrap();
    assert!(page.ends_with("Admin dashboard: /admin"));
    assert!(page.contains("Email:     asha@example.com"));
    session::clear(&path).await.unwrap();
}
