#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{NewUser, Session, User};
use crate::error::IdentityError;

/// Repository for account records (the credential store).
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, IdentityError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, IdentityError>;

    /// Insert an unverified account. Unique violations on username or
    /// email surface as [`IdentityError::Conflict`] so exactly one of two
    /// concurrent registrations wins.
    async fn create(&self, user: &NewUser) -> Result<User, IdentityError>;

    /// Consume a verification code: one conditional UPDATE that sets
    /// verified and clears the code/expiry pair, guarded by
    /// `code matches AND not expired AND not yet verified`.
    /// Returns whether exactly one row changed.
    async fn consume_verification(&self, email: &str, code: &str) -> Result<bool, IdentityError>;

    /// Store a reset token/expiry pair on the account.
    async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> Result<(), IdentityError>;

    /// Consume a reset token: one conditional UPDATE that swaps the
    /// password hash and clears the token/expiry pair, guarded by
    /// `token matches AND not expired`. Returns whether a row changed.
    async fn consume_reset(&self, token: &str, new_hash: &str) -> Result<bool, IdentityError>;

    /// Replace the password hash of a known account (logged-in change).
    async fn update_password_hash(&self, id: i32, new_hash: &str) -> Result<(), IdentityError>;

    /// Delete an account. Dependent sessions go with it (FK cascade).
    /// Returns `false` if the account was already gone.
    async fn delete(&self, id: i32) -> Result<bool, IdentityError>;
}

/// Repository for session records (the session store).
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), IdentityError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, IdentityError>;

    /// Refresh last-accessed. Lost updates between racing requests are
    /// harmless; the timestamp only moves forward.
    async fn touch(&self, id: &str) -> Result<(), IdentityError>;

    /// Delete a session. Returns `false` if it was already gone.
    async fn delete(&self, id: &str) -> Result<bool, IdentityError>;

    /// Bulk-delete sessions last accessed before `cutoff`; returns the count.
    async fn delete_idle_since(&self, cutoff: DateTime<Utc>) -> Result<u64, IdentityError>;
}

/// Outbound notification port. Best-effort: callers log and swallow
/// failures so mail outages never roll back an account mutation.
pub trait Notifier: Send + Sync {
    async fn send_verification_code(
        &self,
        email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), IdentityError>;

    async fn send_reset_link(
        &self,
        email: &str,
        username: &str,
        token: &str,
    ) -> Result<(), IdentityError>;
}
