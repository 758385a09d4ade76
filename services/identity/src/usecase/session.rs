use chrono::{Duration, Utc};

use crate::domain::repository::SessionRepository;
use crate::domain::types::Session;
use crate::error::IdentityError;
use crate::token::{generate_csrf_secret, generate_session_id};

/// Mint and persist a session for `user_id`. The returned record is the
/// only place the CSRF secret is ever surfaced; it cannot be re-derived
/// from the session id later.
pub async fn issue_session<S: SessionRepository>(
    sessions: &S,
    user_id: i32,
) -> Result<Session, IdentityError> {
    let now = Utc::now();
    let session = Session {
        id: generate_session_id(user_id),
        user_id,
        csrf_token: generate_csrf_secret(),
        created_at: now,
        last_accessed: now,
    };
    sessions.create(&session).await?;
    Ok(session)
}

// ── Authenticate ─────────────────────────────────────────────────────────────

/// Resolve a session id to a live session, enforcing the idle timeout
/// server-side: a session idle past the window is deleted and rejected,
/// never revived. A live session gets its last-accessed refreshed.
pub struct AuthenticateSessionUseCase<S: SessionRepository> {
    pub sessions: S,
    pub idle_timeout: Duration,
}

impl<S: SessionRepository> AuthenticateSessionUseCase<S> {
    pub async fn execute(&self, session_id: &str) -> Result<Option<Session>, IdentityError> {
        if session_id.trim().is_empty() {
            return Ok(None);
        }
        let Some(session) = self.sessions.find_by_id(session_id).await? else {
            return Ok(None);
        };
        if session.idle_longer_than(self.idle_timeout) {
            self.sessions.delete(&session.id).await?;
            return Ok(None);
        }
        self.sessions.touch(&session.id).await?;
        Ok(Some(session))
    }
}

// ── Revoke ───────────────────────────────────────────────────────────────────

/// Logout. Idempotent: revoking an absent session reports `false`, never
/// an error.
pub struct RevokeSessionUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> RevokeSessionUseCase<S> {
    pub async fn execute(&self, session_id: &str) -> Result<bool, IdentityError> {
        self.sessions.delete(session_id).await
    }
}

// ── Sweep ────────────────────────────────────────────────────────────────────

/// Bulk-delete sessions idle past `max_idle`. Runs from the `sweep`
/// binary on a schedule, never on the request path.
pub struct SweepSessionsUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> SweepSessionsUseCase<S> {
    pub async fn execute(&self, max_idle: Duration) -> Result<u64, IdentityError> {
        let cutoff = Utc::now() - max_idle;
        self.sessions.delete_idle_since(cutoff).await
    }
}
