use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::types::Session;
use crate::error::IdentityError;
use crate::password::verify_password;
use crate::usecase::session::issue_session;

pub struct LoginInput {
    /// Email, or username as a fallback. A valid username can never
    /// contain `@`, so the two namespaces cannot collide.
    pub identifier: String,
    pub password: String,
}

pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub async fn execute(&self, input: LoginInput) -> Result<Session, IdentityError> {
        let user = match self.users.find_by_email(&input.identifier).await? {
            Some(user) => Some(user),
            None => self.users.find_by_username(&input.identifier).await?,
        };

        // Unknown account and wrong password are indistinguishable.
        let Some(user) = user else {
            return Err(IdentityError::InvalidCredentials);
        };
        if !verify_password(&input.password, &user.password_hash) {
            return Err(IdentityError::InvalidCredentials);
        }

        // Only a caller who proved the password learns the account is
        // still unverified.
        if !user.is_verified {
            return Err(IdentityError::NotVerified);
        }

        issue_session(&self.sessions, user.id).await
    }
}
