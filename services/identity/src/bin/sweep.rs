//! Periodic session garbage collection. Run from a scheduler (cron,
//! systemd timer); the request path never calls this.

use chrono::Duration;
use sea_orm::Database;
use tracing::info;

use shutterbox_core::tracing::init_tracing;
use shutterbox_identity::config::IdentityConfig;
use shutterbox_identity::infra::db::DbSessionRepository;
use shutterbox_identity::usecase::session::SweepSessionsUseCase;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = IdentityConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let usecase = SweepSessionsUseCase {
        sessions: DbSessionRepository { db },
    };
    let count = usecase
        .execute(Duration::days(config.session_sweep_max_idle_days))
        .await
        .expect("session sweep failed");

    info!(count, "swept idle sessions");
}
