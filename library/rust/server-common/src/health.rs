//! ヘルスチェックルート: `/health`, `/healthz`, `/readyz`。

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use sqlx::PgPool;

/// health_routes はヘルスチェック用の Router を返す。
/// `db` が None（インメモリ構成）の場合、readyz は常に ready を返す。
pub fn health_routes<S>(db: Option<PgPool>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .with_state(db)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn readyz(State(db): State<Option<PgPool>>) -> (StatusCode, Json<Value>) {
    let Some(pool) = db else {
        return (
            StatusCode::OK,
            Json(json!({"status": "ready", "database": "not_configured"})),
        );
    };

    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({"status": "ready", "database": "ok"})),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"status": "not_ready", "database": "unreachable"})),
            )
        }
    }
}
