use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::IdentityError;
use crate::state::AppState;
use crate::usecase::password_reset::{RequestPasswordResetUseCase, ResetPasswordUseCase};

// ── POST /identity/forgot-password ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, IdentityError> {
    let usecase = RequestPasswordResetUseCase {
        users: state.user_repo(),
        notifier: state.notifier(),
        policy: state.policy.clone(),
    };
    usecase.execute(&body.email).await?;
    // Accepted whether or not the address resolves to an account.
    Ok(StatusCode::ACCEPTED)
}

// ── POST /identity/reset-password ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, IdentityError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        policy: state.policy.clone(),
    };
    if !usecase.execute(&body.token, &body.new_password).await? {
        return Err(IdentityError::InvalidToken);
    }
    Ok(StatusCode::NO_CONTENT)
}
