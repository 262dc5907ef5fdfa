//! トークン設定。trust domain 内の全サービスで同一の値を使うこと。

use secrecy::SecretString;
use serde::Deserialize;

/// TokenConfig は署名シークレット・アルゴリズム・有効期間の設定を表す。
///
/// ```yaml
/// auth:
///   token:
///     secret: "change-me"
///     algorithm: "HS256"
///     ttl_minutes: 60
///     leeway_secs: 0
/// ```
#[derive(Debug, Deserialize)]
pub struct TokenConfig {
    /// HMAC 署名用の共有シークレット
    pub secret: SecretString,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,
    /// 有効期限判定の許容誤差（秒）。既定は 0（厳密）。
    #[serde(default)]
    pub leeway_secs: u64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            algorithm: default_algorithm(),
            ttl_minutes: default_ttl_minutes(),
            leeway_secs: 0,
        }
    }

    /// 環境変数 AUTH_TOKEN_SECRET が設定されていればシークレットを上書きする。
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("AUTH_TOKEN_SECRET") {
            if !secret.is_empty() {
                self.secret = SecretString::new(secret);
            }
        }
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_ttl_minutes() -> i64 {
    60
}
