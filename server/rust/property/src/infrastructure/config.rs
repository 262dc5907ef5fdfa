use rental_auth::TokenConfig;
use rental_server_common::config::{
    load_yaml, AppConfig, DatabaseConfig, ObservabilityConfig, ServerConfig,
};
use serde::Deserialize;

/// Application configuration for property server.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// AuthConfig は検証に使うトークン設定。auth サーバーと同じ secret を設定する。
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    pub token: TokenConfig,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let mut cfg: Config = load_yaml(path)?;
        cfg.auth.token.apply_env_overrides();
        cfg.database = DatabaseConfig::override_from_env(cfg.database.take());
        Ok(cfg)
    }
}
