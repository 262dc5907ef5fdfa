use std::sync::Arc;

use rental_auth::{hash_password, Role};

use super::run_blocking;
use crate::domain::entity::user::{normalize_email, NewUser, User};
use crate::domain::repository::{UserRepository, UserStoreError};

/// RegisterUserError は利用者登録に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum RegisterUserError {
    #[error("role {0} cannot be self-registered")]
    RoleNotAllowed(Role),

    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("identity store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// RegisterUserInput は登録リクエストの内容。形式検証はハンドラーで済ませている。
#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: Option<Role>,
}

/// RegisterUserUseCase は利用者登録ユースケース。
pub struct RegisterUserUseCase {
    user_repo: Arc<dyn UserRepository>,
}

impl RegisterUserUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// パスワードをハッシュ化して利用者を作成する。
    /// ロール未指定は USER、ADMIN の自己登録は拒否する。
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, RegisterUserError> {
        let role = input.role.unwrap_or_default();
        if role == Role::Admin {
            return Err(RegisterUserError::RoleNotAllowed(role));
        }

        let email = normalize_email(&input.email);
        let password = input.password;
        let password_hash = run_blocking(move || hash_password(&password))
            .await
            .map_err(RegisterUserError::Internal)?
            .map_err(|e| RegisterUserError::Internal(e.to_string()))?;

        let full_name = input
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let user = self
            .user_repo
            .create(NewUser {
                email,
                full_name,
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                UserStoreError::DuplicateEmail(email) => RegisterUserError::DuplicateEmail(email),
                UserStoreError::Unavailable(msg) => RegisterUserError::StoreUnavailable(msg),
                UserStoreError::Internal(msg) => RegisterUserError::Internal(msg),
            })?;

        tracing::info!(user_id = user.id, role = %user.role, "user registered");
        Ok(user)
    }
}
