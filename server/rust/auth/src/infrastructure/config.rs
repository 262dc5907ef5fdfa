use rental_auth::TokenConfig;
use rental_server_common::config::{
    load_yaml, AppConfig, DatabaseConfig, ObservabilityConfig, ServerConfig,
};
use serde::Deserialize;

/// Application configuration for auth server.
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

/// AuthConfig はトークン設定を表す。全サービスで同一の値を使う。
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    pub token: TokenConfig,
}

impl Config {
    /// YAML を読み込み、環境変数（DATABASE_URL / AUTH_TOKEN_SECRET）で上書きする。
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let mut cfg: Config = load_yaml(path)?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) {
        self.auth.token.apply_env_overrides();
        self.database = DatabaseConfig::override_from_env(self.database.take());
    }
}
