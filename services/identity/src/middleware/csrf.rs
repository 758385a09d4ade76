//! CSRF guard, applied to the whole router.
//!
//! Checks run in a fixed order: read-only methods pass, the pre-auth
//! allow-list passes, then the request must carry both the CSRF header
//! and a session cookie that resolve to a live session whose secret
//! matches the header.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::cookie::SESSION_COOKIE;
use crate::error::IdentityError;
use crate::state::AppState;
use crate::usecase::csrf::CsrfGuardUseCase;

/// Request header carrying the per-session CSRF secret.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Routes that cannot yet hold a CSRF secret: they are how a client
/// obtains one in the first place.
pub const PRE_AUTH_ROUTES: &[&str] = &[
    "/identity/register",
    "/identity/login",
    "/identity/verify",
    "/identity/forgot-password",
    "/identity/reset-password",
];

pub async fn csrf_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, IdentityError> {
    let method = request.method();
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return Ok(next.run(request).await);
    }
    if PRE_AUTH_ROUTES.contains(&request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let supplied_token = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let session_id = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned());

    let guard = CsrfGuardUseCase {
        sessions: state.session_repo(),
        idle_timeout: state.policy.session_idle_timeout,
    };
    guard
        .execute(session_id.as_deref(), supplied_token.as_deref())
        .await?;

    Ok(next.run(request).await)
}
