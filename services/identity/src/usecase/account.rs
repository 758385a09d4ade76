use crate::config::SecurityPolicy;
use crate::domain::repository::UserRepository;
use crate::error::IdentityError;
use crate::password::{check_password_policy, hash_password, verify_password};

// ── Change password (logged in) ──────────────────────────────────────────────

/// Password change for an authenticated user: re-proves the current
/// password before swapping the hash.
pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
    pub policy: SecurityPolicy,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        if !verify_password(current_password, &user.password_hash) {
            return Err(IdentityError::InvalidCredentials);
        }

        check_password_policy(new_password)?;
        let new_hash = hash_password(new_password, self.policy.bcrypt_cost)?;
        self.users.update_password_hash(user.id, &new_hash).await
    }
}

// ── Delete account ───────────────────────────────────────────────────────────

/// Account deletion. Sessions go with the row (FK cascade); gallery
/// content cascades in the owning service's store.
pub struct DeleteAccountUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteAccountUseCase<U> {
    pub async fn execute(&self, user_id: i32) -> Result<bool, IdentityError> {
        self.users.delete(user_id).await
    }
}
