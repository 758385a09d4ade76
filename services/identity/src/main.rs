use sea_orm::Database;
use tracing::info;

use shutterbox_core::tracing::init_tracing;
use shutterbox_identity::config::IdentityConfig;
use shutterbox_identity::router::build_router;
use shutterbox_identity::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = IdentityConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        cookie_domain: config.cookie_domain.clone(),
        policy: config.security_policy(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.identity_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("identity service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
