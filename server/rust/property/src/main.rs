use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use rental_auth::{TokenCodec, TokenVerifier};
use rental_property_server::adapter::handler::{router, AppState};
use rental_property_server::adapter::repository::{
    InMemoryPropertyStore, PropertyPostgresRepository, UnitPostgresRepository,
};
use rental_property_server::domain::repository::{PropertyRepository, UnitRepository};
use rental_property_server::infrastructure::{config::Config, database};
use rental_server_common::config::config_path;
use rental_server_common::shutdown::shutdown_signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config
    let cfg = Config::load(&config_path())?;

    // Telemetry
    let telemetry_cfg = rental_telemetry::TelemetryConfig {
        service_name: cfg.app.name.clone(),
        version: cfg.app.version.clone(),
        environment: cfg.app.environment.clone(),
        log_level: cfg.observability.log_level.clone(),
        log_format: cfg.observability.log_format.clone(),
    };
    rental_telemetry::init_telemetry(&telemetry_cfg)
        .map_err(|e| anyhow::anyhow!("failed to init telemetry: {}", e))?;

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting property server"
    );

    // Verification only; this service never issues tokens
    let codec = Arc::new(TokenCodec::from_config(&cfg.auth.token).context("invalid token config")?);
    let verifier = Arc::new(TokenVerifier::new(codec));

    // Database pool (optional)
    let db_pool = match cfg.database.as_ref() {
        Some(db_cfg) => Some(database::connect(db_cfg).await?),
        None => {
            info!("no database configured, using in-memory repositories");
            None
        }
    };

    let (property_repo, unit_repo): (Arc<dyn PropertyRepository>, Arc<dyn UnitRepository>) =
        match db_pool.as_ref() {
            Some(pool) => (
                Arc::new(PropertyPostgresRepository::new(pool.clone())),
                Arc::new(UnitPostgresRepository::new(pool.clone())),
            ),
            None => {
                // 同一ストアを共有し、物件削除時のユニット連鎖削除を保つ
                let store = Arc::new(InMemoryPropertyStore::new());
                (store.clone(), store)
            }
        };

    let state = AppState::new(property_repo, unit_repo, verifier, db_pool);
    let app = router(state);

    let addr = cfg.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "REST server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("property server stopped");
    Ok(())
}
