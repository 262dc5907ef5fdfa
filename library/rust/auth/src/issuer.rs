//! 認証済み Identity に対するトークン発行。

use std::sync::Arc;

use chrono::Duration;

use crate::claims::Claims;
use crate::codec::{CodecError, TokenCodec};
use crate::config::TokenConfig;
use crate::role::Role;

/// TokenIssuer は `iat = now`, `exp = now + ttl` のトークンを発行する。
/// 発行済みトークンは保存しない（ステートレス）。
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(codec: Arc<TokenCodec>, ttl: Duration) -> Self {
        Self { codec, ttl }
    }

    /// ttl_minutes が負、または Duration の範囲外なら InvalidConfig を返す。
    pub fn from_config(codec: Arc<TokenCodec>, cfg: &TokenConfig) -> Result<Self, CodecError> {
        let ttl = Duration::try_minutes(cfg.ttl_minutes)
            .filter(|ttl| *ttl >= Duration::zero())
            .ok_or_else(|| {
                CodecError::InvalidConfig(format!("ttl_minutes out of range: {}", cfg.ttl_minutes))
            })?;
        Ok(Self::new(codec, ttl))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// パスワード検証済みの Identity に対してトークンを発行する。
    pub fn issue(&self, subject_id: i64, role: Role) -> Result<String, CodecError> {
        self.issue_at(subject_id, role, chrono::Utc::now().timestamp())
    }

    /// 発行時刻 `now`（Unix 秒）を指定してトークンを発行する。
    pub fn issue_at(&self, subject_id: i64, role: Role, now: i64) -> Result<String, CodecError> {
        let claims = Claims::new(
            subject_id,
            role,
            now,
            now.saturating_add(self.ttl.num_seconds()),
        );
        self.codec.encode(&claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(b"issuer-secret", Algorithm::HS256, 0).unwrap())
    }

    #[test]
    fn test_issue_sets_canonical_claims() {
        let codec = codec();
        let issuer = TokenIssuer::new(codec.clone(), Duration::minutes(60));

        let token = issuer.issue_at(7, Role::Tenant, 10_000).unwrap();
        let claims = codec.decode_at(&token, 10_001).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role, Role::Tenant);
        assert_eq!(claims.iat, 10_000);
        assert_eq!(claims.exp, 10_000 + 3600);
    }

    #[test]
    fn test_issue_zero_ttl_is_expired_immediately() {
        let codec = codec();
        let issuer = TokenIssuer::new(codec.clone(), Duration::zero());

        let token = issuer.issue_at(1, Role::Owner, 10_000).unwrap();
        assert_eq!(codec.decode_at(&token, 10_000), Err(CodecError::Expired));
    }

    #[test]
    fn test_from_config_uses_ttl_minutes() {
        let mut cfg = TokenConfig::new("issuer-secret");
        cfg.ttl_minutes = 15;
        let issuer = TokenIssuer::from_config(codec(), &cfg).unwrap();
        assert_eq!(issuer.ttl(), Duration::minutes(15));
    }

    #[test]
    fn test_from_config_rejects_out_of_range_ttl() {
        let mut cfg = TokenConfig::new("issuer-secret");
        cfg.ttl_minutes = i64::MAX;
        assert!(matches!(
            TokenIssuer::from_config(codec(), &cfg),
            Err(CodecError::InvalidConfig(_))
        ));

        cfg.ttl_minutes = -1;
        assert!(matches!(
            TokenIssuer::from_config(codec(), &cfg),
            Err(CodecError::InvalidConfig(_))
        ));
    }
}
