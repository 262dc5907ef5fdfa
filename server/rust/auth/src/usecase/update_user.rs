use std::sync::Arc;

use crate::domain::entity::user::{User, UserUpdate};
use crate::domain::repository::{UserRepository, UserStoreError};

/// UpdateUserError は管理者による利用者更新のエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum UpdateUserError {
    #[error("user not found: {0}")]
    NotFound(i64),

    #[error("no changes requested")]
    EmptyUpdate,

    #[error("identity store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// UpdateUserUseCase は利用者のロール・有効フラグを変更するユースケース。
/// 呼び出し元が ADMIN であることはルーター側で保証する。
/// 変更は次回ログイン時に発行されるトークンから反映される。
pub struct UpdateUserUseCase {
    user_repo: Arc<dyn UserRepository>,
}

impl UpdateUserUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, id: i64, update: UserUpdate) -> Result<User, UpdateUserError> {
        if update.is_empty() {
            return Err(UpdateUserError::EmptyUpdate);
        }

        let user = self
            .user_repo
            .update(id, update)
            .await
            .map_err(|e| match e {
                UserStoreError::Unavailable(msg) => UpdateUserError::StoreUnavailable(msg),
                other => UpdateUserError::Internal(other.to_string()),
            })?
            .ok_or(UpdateUserError::NotFound(id))?;

        tracing::info!(
            user_id = user.id,
            role = %user.role,
            is_active = user.is_active,
            "user updated"
        );
        Ok(user)
    }
}
