//! YAML 設定ファイル読み込みと、各サーバー共通の設定セクション。

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// 設定ファイルパスを指定する環境変数名。
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// 設定ファイルの既定パス。
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// config_path は `CONFIG_PATH` 環境変数または既定パスを返す。
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// load_yaml は YAML ファイルを読み込み、型付き設定にデシリアライズする。
pub fn load_yaml<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path, e))?;
    let cfg = serde_yaml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path, e))?;
    Ok(cfg)
}

/// AppConfig はアプリケーション設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

/// ServerConfig は HTTP サーバーのバインド設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// DatabaseConfig はデータベース接続設定を表す。
/// 接続 URL はパスワードを含むため SecretString で保持する。
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: SecretString,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

impl DatabaseConfig {
    /// `DATABASE_URL` 環境変数が設定されていれば、その値で DatabaseConfig を生成する。
    pub fn from_env() -> Option<Self> {
        std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .map(|url| Self {
                url: SecretString::new(url),
                max_connections: default_max_connections(),
            })
    }

    /// `DATABASE_URL` 環境変数でファイル設定を上書きする。
    pub fn override_from_env(current: Option<Self>) -> Option<Self> {
        match (current, Self::from_env()) {
            (Some(mut cfg), Some(env)) => {
                cfg.url = env.url;
                Some(cfg)
            }
            (None, env) => env,
            (current, None) => current,
        }
    }
}

/// ObservabilityConfig はログ出力設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}
