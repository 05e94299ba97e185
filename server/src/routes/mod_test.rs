use super::*;
use axum::body::{Body, to_bytes};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request};
use tower::ServiceExt;
use travel::ErrorBody;

use crate::state::test_helpers::test_app_state;

async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app(test_app_state()).oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body should read");
    (status, body.to_vec())
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn assert_login_required(request: Request<Body>) {
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body: ErrorBody = serde_json::from_slice(&body).expect("error body should be json");
    assert_eq!(body.error, "Please login to continue");
    assert_eq!(body.redirect.as_deref(), Some("/login"));
}

#[tokio::test]
async fn healthz_is_ok() {
    let (status, _) = send(get_request("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = send(get_request("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    for uri in [
        "/api/auth/session",
        "/api/auth/events",
        "/api/nav",
        "/api/destinations",
        "/api/destinations?q=goa",
        "/api/bookings",
        "/api/profile",
    ] {
        assert_login_required(get_request(uri)).await;
    }
}

#[tokio::test]
async fn logout_without_session_is_unauthorized() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    assert_login_required(request).await;
}

#[tokio::test]
async fn booking_without_session_is_rejected_before_body_parsing() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bookings")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    assert_login_required(request).await;
}

#[tokio::test]
async fn malformed_bearer_token_is_rejected() {
    let request = Request::builder()
        .uri("/api/profile")
        .header(AUTHORIZATION, "Bearer not-a-real-token")
        .body(Body::empty())
        .unwrap();
    assert_login_required(request).await;
}

#[tokio::test]
async fn malformed_cookie_is_rejected() {
    let request = Request::builder()
        .uri("/api/bookings")
        .header(COOKIE, "session_token=short")
        .body(Body::empty())
        .unwrap();
    assert_login_required(request).await;
}

#[tokio::test]
async fn login_with_bad_json_is_client_error() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\":"))
        .unwrap();
    let (status, _) = send(request).await;
    assert!(status.is_client_error());
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

#[tokio::test]
async fn signup_rejects_invalid_email() {
    let (status, body) = send(json_post("/api/auth/signup", r#"{"email":"nope","password":"secret123"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.error, "invalid email");
    assert!(body.redirect.is_none());
}

#[tokio::test]
async fn signup_rejects_short_password() {
    let (status, body) = send(json_post("/api/auth/signup", r#"{"email":"a@example.com","password":"123"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.error, "password must be at least 6 characters");
}

#[tokio::test]
async fn login_with_malformed_email_is_invalid_credentials() {
    let (status, body) = send(json_post("/api/auth/login", r#"{"email":"nope","password":"secret123"}"#)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.error, "Invalid login credentials");
}
