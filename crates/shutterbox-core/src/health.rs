use axum::http::StatusCode;

/// Handler for `GET /healthz` (liveness probe).
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` (readiness probe). Services that gate
/// readiness on the database should route their own handler instead.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
