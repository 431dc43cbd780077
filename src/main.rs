use std::sync::Arc;

use dotenvy::dotenv;
use emqam::emqam_auth::MemoryStore;
use emqam::emqam_config::{
    BootstrapConfig, CorsConfig, LoggingConfig, SecurityConfig, ServerConfig,
};
use emqam::emqam_models::RoleFlags;
use emqam::logging::init_tracing;
use emqam::metrics::{init_metrics, metrics_app};
use emqam::router::init_router;
use emqam::state::AppState;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing(&LoggingConfig::from_env())?;

    let server = ServerConfig::from_env();
    let security = SecurityConfig::from_env();
    if !security.is_configured() {
        warn!("SECURITY_KEY or SECURITY_SECRET is empty; every application-tier request will be rejected");
    }

    let store = Arc::new(MemoryStore::new());
    if let Some(bootstrap) = BootstrapConfig::from_env() {
        seed_admin(&store, &bootstrap)?;
    }

    let state = AppState::in_memory(
        security,
        store,
        server.store_timeout,
        CorsConfig::from_env(),
    );
    let app = init_router(state).merge(metrics_app(init_metrics()?));

    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn seed_admin(store: &MemoryStore, bootstrap: &BootstrapConfig) -> anyhow::Result<()> {
    let admin = store.add_user(
        &bootstrap.admin_username,
        &bootstrap.admin_password,
        RoleFlags::ADMIN,
    )?;
    info!(user_id = %admin.id, username = %admin.username, "bootstrap admin created");
    Ok(())
}
