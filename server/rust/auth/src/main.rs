use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use rental_auth::{TokenCodec, TokenIssuer, TokenVerifier};
use rental_auth_server::adapter::handler::{router, AppState};
use rental_auth_server::adapter::repository::{InMemoryUserRepository, UserPostgresRepository};
use rental_auth_server::domain::repository::UserRepository;
use rental_auth_server::infrastructure::{config::Config, database};
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
        "starting auth server"
    );

    // Token codec (shared secret is loaded once and shared immutably)
    let codec = Arc::new(TokenCodec::from_config(&cfg.auth.token).context("invalid token config")?);
    let issuer = Arc::new(
        TokenIssuer::from_config(codec.clone(), &cfg.auth.token).context("invalid token ttl")?,
    );
    let verifier = Arc::new(TokenVerifier::new(codec));
    info!(
        algorithm = %cfg.auth.token.algorithm,
        ttl_minutes = issuer.ttl().num_minutes(),
        "token issuer configured"
    );

    // Database pool (optional)
    let db_pool = match cfg.database.as_ref() {
        Some(db_cfg) => Some(database::connect(db_cfg).await?),
        None => {
            info!("no database configured, using in-memory repositories");
            None
        }
    };

    // Identity Store (PostgreSQL or in-memory)
    let user_repo: Arc<dyn UserRepository> = match db_pool.as_ref() {
        Some(pool) => Arc::new(UserPostgresRepository::new(pool.clone())),
        None => Arc::new(InMemoryUserRepository::new()),
    };

    let state = AppState::new(user_repo, issuer, verifier, db_pool);
    let app = router(state);

    let addr = cfg.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "REST server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("auth server stopped");
    Ok(())
}
