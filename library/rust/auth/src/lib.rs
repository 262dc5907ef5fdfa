//! rental-auth: 共有シークレット方式の JWT 発行・検証 + ロール/所有者認可ライブラリ
//!
//! auth サービスが HMAC 署名付きトークンを発行し、property / leasing サービスが
//! 同じシークレットで検証する。検証結果は [`IdentityContext`] として
//! リクエストエクステンションに格納され、ハンドラーから取り出して認可に使う。
//!
//! # 使い方
//!
//! ```ignore
//! use rental_auth::{Role, TokenCodec, TokenIssuer, TokenVerifier};
//! use std::sync::Arc;
//!
//! let codec = Arc::new(TokenCodec::from_config(&cfg.auth.token)?);
//! let issuer = TokenIssuer::from_config(codec.clone(), &cfg.auth.token)?;
//! let verifier = TokenVerifier::new(codec);
//!
//! let token = issuer.issue(42, Role::Owner)?;
//! let ctx = verifier.verify(&token)?;
//! assert_eq!(ctx.id, 42);
//! ```

pub mod claims;
pub mod codec;
pub mod config;
pub mod issuer;
pub mod middleware;
pub mod password;
pub mod rbac;
pub mod role;
pub mod verifier;

pub use claims::{Claims, IdentityContext};
pub use codec::{CodecError, TokenCodec};
pub use config::TokenConfig;
pub use issuer::TokenIssuer;
pub use middleware::{auth_middleware, require_role, AuthErrorResponse, AuthState};
pub use password::{hash_password, verify_password, PasswordError};
pub use rbac::{authorize, has_any_role, has_role, is_owner, OwnerScope, Requirement};
pub use role::{Role, UnknownRoleError};
pub use verifier::{AuthError, TokenVerifier};

#[cfg(test)]
mod tests;
