//! Router-level checks for the paths that resolve before any query runs:
//! health probes, guard rejections, and input validation.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::Duration;
use sea_orm::DatabaseConnection;

use shutterbox_identity::config::SecurityPolicy;
use shutterbox_identity::router::build_router;
use shutterbox_identity::state::AppState;

fn test_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::default(),
        cookie_domain: "example.com".to_owned(),
        policy: SecurityPolicy {
            bcrypt_cost: 4,
            verification_expiry: Duration::hours(24),
            reset_expiry: Duration::hours(1),
            session_idle_timeout: Duration::seconds(1800),
        },
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn healthz_is_open() {
    let server = test_server();
    let response = server.get("/healthz").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn state_changing_route_requires_csrf_token() {
    let server = test_server();
    let response = server.patch("/identity/password").await;
    response.assert_status(StatusCode::FORBIDDEN);

    let json: serde_json::Value = response.json();
    assert_eq!(json["kind"], "FORBIDDEN");
    assert_eq!(json["message"], "CSRF token missing");
}

#[tokio::test]
async fn csrf_token_without_session_is_unauthorized() {
    let server = test_server();
    let response = server
        .patch("/identity/password")
        .add_header(
            HeaderName::from_static("x-csrf-token"),
            HeaderValue::from_static("some-token"),
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let json: serde_json::Value = response.json();
    assert_eq!(json["kind"], "UNAUTHORIZED");
    assert_eq!(json["message"], "Not authenticated");
}

#[tokio::test]
async fn register_bypasses_guard_and_validates_input() {
    let server = test_server();
    // No CSRF header at all: the allow-list admits the request, and
    // validation rejects it before any store access.
    let response = server
        .post("/identity/register")
        .json(&serde_json::json!({
            "username": "x",
            "email": "a@x.com",
            "password": "Passw0rd",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let json: serde_json::Value = response.json();
    assert_eq!(json["kind"], "VALIDATION");
}

#[tokio::test]
async fn session_check_without_cookie_is_unauthorized() {
    let server = test_server();
    // GET bypasses the guard; the handler itself requires the cookie.
    let response = server.get("/identity/session").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
