use chrono::Utc;

use crate::config::SecurityPolicy;
use crate::domain::repository::{Notifier, UserRepository};
use crate::error::IdentityError;
use crate::password::{check_password_policy, hash_password};
use crate::token::generate_reset_token;

// ── Request reset ────────────────────────────────────────────────────────────

/// Issue a reset token. Reports success whether or not the email resolves
/// to an account, so the endpoint cannot be used to enumerate addresses.
pub struct RequestPasswordResetUseCase<U, N>
where
    U: UserRepository,
    N: Notifier,
{
    pub users: U,
    pub notifier: N,
    pub policy: SecurityPolicy,
}

impl<U, N> RequestPasswordResetUseCase<U, N>
where
    U: UserRepository,
    N: Notifier,
{
    pub async fn execute(&self, email: &str) -> Result<(), IdentityError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(());
        };

        let token = generate_reset_token();
        let expiry = Utc::now() + self.policy.reset_expiry;
        self.users.set_reset_token(&user.email, &token, expiry).await?;

        if let Err(e) = self
            .notifier
            .send_reset_link(&user.email, &user.username, &token)
            .await
        {
            tracing::warn!(error = %e, email = %user.email, "failed to enqueue reset mail");
        }

        Ok(())
    }
}

// ── Consume reset ────────────────────────────────────────────────────────────

pub struct ResetPasswordUseCase<U: UserRepository> {
    pub users: U,
    pub policy: SecurityPolicy,
}

impl<U: UserRepository> ResetPasswordUseCase<U> {
    /// Swap the password hash behind a valid token. The conditional
    /// UPDATE clears the token as it matches, so a replay (concurrent
    /// or later) finds nothing to match and reports `false`.
    pub async fn execute(&self, token: &str, new_password: &str) -> Result<bool, IdentityError> {
        check_password_policy(new_password)?;
        let new_hash = hash_password(new_password, self.policy.bcrypt_cost)?;
        self.users.consume_reset(token, &new_hash).await
    }
}
