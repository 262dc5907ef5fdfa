use std::sync::{Arc, OnceLock};

use rental_auth::{hash_password, verify_password, TokenIssuer};
use serde::Serialize;

use super::run_blocking;
use crate::domain::entity::user::normalize_email;
use crate::domain::repository::{UserRepository, UserStoreError};

/// LoginError はログインに関するエラーを表す。
/// 利用者不在・パスワード不一致・無効化済みはすべて InvalidCredentials になる。
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error("identity store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// LoginOutput はログイン成功時に返すトークン。
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutput {
    pub access_token: String,
    pub token_type: &'static str,
}

/// 利用者が存在しない場合も照合コストを揃えるためのダミーハッシュ。
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("rental-dummy-password").unwrap_or_default())
}

/// LoginUseCase はメールアドレスとパスワードを照合してトークンを発行するユースケース。
pub struct LoginUseCase {
    user_repo: Arc<dyn UserRepository>,
    issuer: Arc<TokenIssuer>,
}

impl LoginUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>, issuer: Arc<TokenIssuer>) -> Self {
        Self { user_repo, issuer }
    }

    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, LoginError> {
        let email = normalize_email(&input.email);
        let user = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(|e| match e {
                UserStoreError::Unavailable(msg) => LoginError::StoreUnavailable(msg),
                other => LoginError::Internal(other.to_string()),
            })?;

        let password = input.password;
        let hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| dummy_hash().to_string());
        let verified = run_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(LoginError::Internal)?;

        let user = match user {
            Some(user) if verified && user.is_active => user,
            Some(user) => {
                tracing::debug!(user_id = user.id, active = user.is_active, "login rejected");
                return Err(LoginError::InvalidCredentials);
            }
            None => {
                tracing::debug!("login rejected: unknown email");
                return Err(LoginError::InvalidCredentials);
            }
        };

        let access_token = self
            .issuer
            .issue(user.id, user.role)
            .map_err(|e| LoginError::Internal(e.to_string()))?;

        tracing::info!(user_id = user.id, role = %user.role, "token issued");
        Ok(LoginOutput {
            access_token,
            token_type: "bearer",
        })
    }
}
