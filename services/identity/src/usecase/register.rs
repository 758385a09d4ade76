use chrono::Utc;

use crate::config::SecurityPolicy;
use crate::domain::repository::{Notifier, UserRepository};
use crate::domain::types::{NewUser, User};
use crate::domain::validate::{is_valid_email, is_valid_username};
use crate::error::IdentityError;
use crate::password::{check_password_policy, hash_password};
use crate::token::generate_verification_code;

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<U, N>
where
    U: UserRepository,
    N: Notifier,
{
    pub users: U,
    pub notifier: N,
    pub policy: SecurityPolicy,
}

impl<U, N> RegisterUseCase<U, N>
where
    U: UserRepository,
    N: Notifier,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<User, IdentityError> {
        // 1. Grammar and policy checks, before touching the store.
        if !is_valid_username(&input.username) {
            return Err(IdentityError::Validation(
                "username must be 3-20 characters of letters, digits, or underscores".to_owned(),
            ));
        }
        if !is_valid_email(&input.email) {
            return Err(IdentityError::Validation(
                "email address is not valid".to_owned(),
            ));
        }
        check_password_policy(&input.password)?;

        // 2. Duplicate checks, exact match as stored. The unique
        // constraints in the store settle concurrent races; these reads
        // exist to report which field conflicted.
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(IdentityError::Conflict("email already registered"));
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(IdentityError::Conflict("username already taken"));
        }

        // 3. Hash, mint the code, persist unverified.
        let password_hash = hash_password(&input.password, self.policy.bcrypt_cost)?;
        let code = generate_verification_code();
        let user = self
            .users
            .create(&NewUser {
                username: input.username,
                email: input.email,
                password_hash,
                verification_code: code.clone(),
                verification_expiry: Utc::now() + self.policy.verification_expiry,
            })
            .await?;

        // 4. Best-effort notification: a mail outage must not undo the
        // registration.
        if let Err(e) = self
            .notifier
            .send_verification_code(&user.email, &user.username, &code)
            .await
        {
            tracing::warn!(error = %e, email = %user.email, "failed to enqueue verification mail");
        }

        Ok(user)
    }
}
