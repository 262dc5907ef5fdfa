use std::time::Duration;

use rental_server_common::config::DatabaseConfig;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// connect は PostgreSQL 接続プールを作成する。
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(cfg.url.expose_secret())
        .await?;
    tracing::info!(max_connections = cfg.max_connections, "database connection pool established");
    Ok(pool)
}
