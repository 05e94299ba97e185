use super::*;
use axum::body::to_bytes;
use uuid::Uuid;

async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
    let resp = err.into_response();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 64 * 1024).await.expect("body should be readable");
    (status, serde_json::from_slice(&bytes).expect("body should be json"))
}

#[tokio::test]
async fn unauthorized_carries_login_redirect() {
    let (status, json) = body_json(ApiError::login_required()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["redirect"], "/login");
    assert_eq!(json["error"], "Please login to continue");
}

#[tokio::test]
async fn not_found_has_no_redirect() {
    let (status, json) = body_json(ApiError::NotFound("Destination not found".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("redirect").is_none());
}

#[test]
fn invalid_credentials_message_passes_through() {
    let err: ApiError = AuthError::InvalidCredentials.into();
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(err.to_string(), "Invalid login credentials");
}

#[test]
fn duplicate_registration_is_conflict() {
    let err: ApiError = AuthError::AlreadyRegistered.into();
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.to_string(), "User already registered");
}

#[test]
fn form_errors_are_bad_requests() {
    let err: ApiError = BookingError::Invalid(FormError::InvalidTravelers).into();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(err.to_string().contains("travelers"));
}

#[test]
fn missing_destination_on_booking_is_not_found() {
    let err: ApiError = BookingError::DestinationNotFound(Uuid::nil()).into();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "Destination not found");
}

#[test]
fn database_errors_are_hidden() {
    let err: ApiError = DestinationError::Database(sqlx::Error::PoolTimedOut).into();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.to_string(), "an unexpected error occurred");
}
