use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::{UserRepository, UserStoreError};

/// GetUserError は利用者取得に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum GetUserError {
    #[error("user not found: {0}")]
    NotFound(i64),

    #[error("identity store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// GetUserUseCase は利用者情報取得ユースケース。
pub struct GetUserUseCase {
    user_repo: Arc<dyn UserRepository>,
}

impl GetUserUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, id: i64) -> Result<User, GetUserError> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(|e| match e {
                UserStoreError::Unavailable(msg) => GetUserError::StoreUnavailable(msg),
                other => GetUserError::Internal(other.to_string()),
            })?
            .ok_or(GetUserError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::user_repository::MockUserRepository;
    use rental_auth::Role;

    #[tokio::test]
    async fn test_get_user_success() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id()
            .withf(|id| *id == 3)
            .returning(|id| {
                Ok(Some(User {
                    id,
                    email: "bob@example.com".to_string(),
                    full_name: Some("Bob".to_string()),
                    password_hash: "hash".to_string(),
                    role: Role::Tenant,
                    is_active: true,
                    created_at: chrono::Utc::now(),
                }))
            });

        let uc = GetUserUseCase::new(Arc::new(mock));
        let user = uc.execute(3).await.unwrap();
        assert_eq!(user.email, "bob@example.com");
        assert_eq!(user.role, Role::Tenant);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));

        let uc = GetUserUseCase::new(Arc::new(mock));
        assert!(matches!(uc.execute(404).await, Err(GetUserError::NotFound(404))));
    }
}
