use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use rental_auth::{TokenCodec, TokenVerifier};
use rental_leasing_server::adapter::handler::{router, AppState};
use rental_leasing_server::adapter::repository::{
    InMemoryLeasingStore, LeasePostgresRepository, PaymentPostgresRepository,
};
use rental_leasing_server::domain::repository::{LeaseRepository, PaymentRepository};
use rental_leasing_server::infrastructure::{config::Config, database};
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
        "starting leasing server"
    );

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

    let (lease_repo, payment_repo): (Arc<dyn LeaseRepository>, Arc<dyn PaymentRepository>) =
        match db_pool.as_ref() {
            Some(pool) => (
                Arc::new(LeasePostgresRepository::new(pool.clone())),
                Arc::new(PaymentPostgresRepository::new(pool.clone())),
            ),
            None => {
                let store = Arc::new(InMemoryLeasingStore::new());
                (store.clone(), store)
            }
        };

    let state = AppState::new(lease_repo, payment_repo, verifier, db_pool);
    let app = router(state);

    let addr = cfg.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "REST server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("leasing server stopped");
    Ok(())
}
