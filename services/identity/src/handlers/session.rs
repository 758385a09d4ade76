use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::cookie::{SESSION_COOKIE, clear_session_cookie, set_session_cookie};
use crate::error::IdentityError;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};
use crate::usecase::session::{AuthenticateSessionUseCase, RevokeSessionUseCase};

/// Issuance response: the one and only time the CSRF secret is surfaced.
/// The session id itself travels in the Set-Cookie header.
#[derive(Serialize)]
pub struct SessionResponse {
    pub user_id: i32,
    pub csrf_token: String,
}

// ── POST /identity/login ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, IdentityError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
    };
    let session = usecase
        .execute(LoginInput {
            identifier: body.identifier,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookie(jar, session.id.clone(), state.cookie_domain.clone());
    Ok((
        StatusCode::CREATED,
        jar,
        Json(SessionResponse {
            user_id: session.user_id,
            csrf_token: session.csrf_token,
        }),
    ))
}

// ── GET /identity/session ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CheckSessionResponse {
    pub user_id: i32,
}

pub async fn check_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, IdentityError> {
    let session_id = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or(IdentityError::Unauthorized("Not authenticated"))?;

    let usecase = AuthenticateSessionUseCase {
        sessions: state.session_repo(),
        idle_timeout: state.policy.session_idle_timeout,
    };
    let session = usecase
        .execute(&session_id)
        .await?
        .ok_or(IdentityError::Unauthorized("Invalid session"))?;

    Ok(Json(CheckSessionResponse {
        user_id: session.user_id,
    }))
}

// ── DELETE /identity/session ──────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, IdentityError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let usecase = RevokeSessionUseCase {
            sessions: state.session_repo(),
        };
        // Idempotent: an already-gone session is still a successful logout.
        usecase.execute(cookie.value()).await?;
    }
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}
