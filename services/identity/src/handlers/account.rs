use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::cookie::{SESSION_COOKIE, clear_session_cookie, set_session_cookie};
use crate::error::IdentityError;
use crate::handlers::session::SessionResponse;
use crate::state::AppState;
use crate::usecase::account::{ChangePasswordUseCase, DeleteAccountUseCase};
use crate::usecase::register::{RegisterInput, RegisterUseCase};
use crate::usecase::session::AuthenticateSessionUseCase;
use crate::usecase::verify::{VerifyEmailInput, VerifyEmailUseCase};

// ── POST /identity/register ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, IdentityError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        notifier: state.notifier(),
        policy: state.policy.clone(),
    };
    let user = usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            is_verified: user.is_verified,
        }),
    ))
}

// ── POST /identity/verify ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

pub async fn verify(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyRequest>,
) -> Result<impl IntoResponse, IdentityError> {
    let usecase = VerifyEmailUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
    };
    let session = usecase
        .execute(VerifyEmailInput {
            email: body.email,
            code: body.code,
        })
        .await?
        // One generic answer regardless of the failure cause.
        .ok_or(IdentityError::InvalidVerification)?;

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

// ── PATCH /identity/password ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, IdentityError> {
    let user_id = authenticated_user(&state, &jar).await?;

    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
        policy: state.policy.clone(),
    };
    usecase
        .execute(user_id, &body.current_password, &body.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /identity/account ──────────────────────────────────────────────────

pub async fn delete_account(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, IdentityError> {
    let user_id = authenticated_user(&state, &jar).await?;

    let usecase = DeleteAccountUseCase {
        users: state.user_repo(),
    };
    usecase.execute(user_id).await?;

    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}

/// Resolve the session cookie to its owning user, or 401.
async fn authenticated_user(state: &AppState, jar: &CookieJar) -> Result<i32, IdentityError> {
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
    Ok(session.user_id)
}
