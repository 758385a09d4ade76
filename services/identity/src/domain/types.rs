use chrono::{DateTime, Duration, Utc};

/// Account record as stored. The verification and reset pairs are
/// both-set or both-null, never one without the other.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub verification_code: Option<String>,
    pub verification_expiry: Option<DateTime<Utc>>,
    pub reset_token: Option<String>,
    pub reset_expiry: Option<DateTime<Utc>>,
    pub receive_notifications: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating an account; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub verification_code: String,
    pub verification_expiry: DateTime<Utc>,
}

/// Server-side session. `id` is the bearer secret (cookie value);
/// `csrf_token` is a distinct secret echoed on state-changing requests.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub user_id: i32,
    pub csrf_token: String,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
}

impl Session {
    /// Whether the session has sat idle longer than `timeout`.
    pub fn idle_longer_than(&self, timeout: Duration) -> bool {
        Utc::now() - self.last_accessed > timeout
    }
}

/// Verification code length in digits (zero-padded).
pub const VERIFICATION_CODE_LEN: u32 = 6;

/// Reset-token and CSRF-secret entropy in bytes (hex-encoded on the wire).
pub const TOKEN_BYTES: usize = 32;

/// Username length bounds; the allowed alphabet is `[A-Za-z0-9_]`.
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;

/// Minimum password length; uppercase, lowercase and digit are also required.
pub const PASSWORD_MIN_LEN: usize = 8;
