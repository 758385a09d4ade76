use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::types::Session;
use crate::error::IdentityError;
use crate::usecase::session::issue_session;

pub struct VerifyEmailInput {
    pub email: String,
    pub code: String,
}

/// Consume a verification code and activate the account, then log the
/// caller in. Returns `None`, not an error, on any failure (unknown
/// email, already verified, wrong code, expired code) so the surface
/// cannot be used to tell those cases apart.
pub struct VerifyEmailUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> VerifyEmailUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub async fn execute(&self, input: VerifyEmailInput) -> Result<Option<Session>, IdentityError> {
        // One conditional UPDATE: of two racing attempts with the same
        // still-valid code, exactly one sees rows_affected == 1.
        if !self
            .users
            .consume_verification(&input.email, &input.code)
            .await?
        {
            return Ok(None);
        }

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| anyhow::anyhow!("account disappeared after verification"))?;

        let session = issue_session(&self.sessions, user.id).await?;
        Ok(Some(session))
    }
}
