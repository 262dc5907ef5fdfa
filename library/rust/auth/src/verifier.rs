//! トークン検証器: Bearer トークンを検証し IdentityContext を返す。

use std::sync::Arc;

use crate::claims::IdentityContext;
use crate::codec::{CodecError, TokenCodec};

/// AuthError は認証・認可エラーを表す。
///
/// `PermissionDenied` 以外はすべて API 上は同一の 401 として扱う。
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingToken,

    #[error("invalid Authorization header format")]
    InvalidAuthHeader,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] CodecError),

    #[error("permission denied")]
    PermissionDenied,
}

impl AuthError {
    /// 401 として扱うべきエラーかを返す。
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, AuthError::PermissionDenied)
    }
}

/// TokenVerifier は署名と有効期限を検証する。Identity Store は参照しない。
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    codec: Arc<TokenCodec>,
}

impl TokenVerifier {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// トークン文字列を検証し、IdentityContext を返す。
    pub fn verify(&self, token: &str) -> Result<IdentityContext, AuthError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// 指定時刻 `now`（Unix 秒）でトークンを検証する。
    pub fn verify_at(&self, token: &str, now: i64) -> Result<IdentityContext, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = self.codec.decode_at(token, now)?;
        let id = claims
            .subject_id()
            .ok_or_else(|| CodecError::Malformed("subject is not an integer id".into()))?;

        Ok(IdentityContext::new(id, claims.role))
    }

    /// Authorization ヘッダー値（`Bearer <token>`）を検証する。
    pub fn verify_header(&self, header: Option<&str>) -> Result<IdentityContext, AuthError> {
        let token = parse_bearer(header.ok_or(AuthError::MissingToken)?)?;
        self.verify(token)
    }
}

/// `Bearer <token>` 形式のヘッダー値からトークン部分を取り出す。
/// スキーム名は大文字小文字を区別しない。
pub fn parse_bearer(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().map(str::trim).unwrap_or_default();

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::InvalidAuthHeader);
    }
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}
