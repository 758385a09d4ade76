use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Identity service error variants.
///
/// Credential-shaped failures stay deliberately generic: "no such user"
/// and "wrong secret" share one variant so responses cannot be used to
/// enumerate accounts.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired verification code")]
    InvalidVerification,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("email not verified")]
    NotVerified,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IdentityError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidVerification => "INVALID_VERIFICATION",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::NotVerified => "NOT_VERIFIED",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials
            | Self::InvalidVerification
            | Self::InvalidToken
            | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotVerified | Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only: tower-http TraceLayer already records method/uri/status
        // for every request, and 4xx are expected client errors. Internal errors
        // carry the anyhow chain, which is what makes the root cause traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
