use chrono::Duration;
use subtle::ConstantTimeEq;

use crate::domain::repository::SessionRepository;
use crate::error::IdentityError;

/// The credential checks of the CSRF guard (the method and allow-list
/// bypasses live in the HTTP middleware). Checks run in a fixed order:
/// token presence, then session presence, then session liveness, then
/// the constant-time secret comparison.
pub struct CsrfGuardUseCase<S: SessionRepository> {
    pub sessions: S,
    pub idle_timeout: Duration,
}

impl<S: SessionRepository> CsrfGuardUseCase<S> {
    /// Returns the authenticated user id when every check passes.
    pub async fn execute(
        &self,
        session_id: Option<&str>,
        supplied_token: Option<&str>,
    ) -> Result<i32, IdentityError> {
        let token = supplied_token
            .filter(|t| !t.is_empty())
            .ok_or(IdentityError::Forbidden("CSRF token missing"))?;

        let session_id = session_id
            .filter(|id| !id.is_empty())
            .ok_or(IdentityError::Unauthorized("Not authenticated"))?;

        let Some(session) = self.sessions.find_by_id(session_id).await? else {
            return Err(IdentityError::Unauthorized("Invalid session"));
        };
        if session.idle_longer_than(self.idle_timeout) {
            self.sessions.delete(&session.id).await?;
            return Err(IdentityError::Unauthorized("Invalid session"));
        }
        self.sessions.touch(&session.id).await?;

        let token_matches: bool = token
            .as_bytes()
            .ct_eq(session.csrf_token.as_bytes())
            .into();
        if !token_matches {
            return Err(IdentityError::Forbidden("Invalid CSRF token"));
        }

        Ok(session.user_id)
    }
}
