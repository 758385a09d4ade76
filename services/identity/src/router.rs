use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use shutterbox_core::health::{healthz, readyz};
use shutterbox_core::middleware::request_id_layer;

use crate::handlers::{
    account::{change_password, delete_account, register, verify},
    password::{forgot_password, reset_password},
    session::{check_session, login, logout},
};
use crate::middleware::csrf::csrf_guard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Account
        .route("/identity/register", post(register))
        .route("/identity/verify", post(verify))
        .route("/identity/password", patch(change_password))
        .route("/identity/account", delete(delete_account))
        // Session
        .route("/identity/login", post(login))
        .route("/identity/session", get(check_session))
        .route("/identity/session", delete(logout))
        // Password reset
        .route("/identity/forgot-password", post(forgot_password))
        .route("/identity/reset-password", post(reset_password))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            csrf_guard,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
