use sea_orm::DatabaseConnection;

use crate::config::SecurityPolicy;
use crate::infra::db::{DbSessionRepository, DbUserRepository};
use crate::infra::outbox::OutboxNotifier;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cookie_domain: String,
    pub policy: SecurityPolicy,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }

    pub fn notifier(&self) -> OutboxNotifier {
        OutboxNotifier {
            db: self.db.clone(),
        }
    }
}
