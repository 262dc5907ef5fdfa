use async_trait::async_trait;

use crate::domain::entity::user::{NewUser, User, UserUpdate};

/// UserStoreError は Identity Store の操作エラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("identity store unavailable: {0}")]
    Unavailable(String),

    #[error("identity store error: {0}")]
    Internal(String),
}

/// UserRepository は Identity Store へのアクセスを抽象化するトレイト。
///
/// email は呼び出し側で小文字に正規化して渡す。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// メールアドレスで利用者を検索する。
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// ID で利用者を検索する。
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserStoreError>;

    /// 利用者を作成する。同一 email が既に存在する場合は DuplicateEmail を返す。
    /// 同一 email の同時作成は高々 1 件だけが成功する。
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError>;

    /// ロール・有効フラグを更新する。存在しない場合は None を返す。
    async fn update(&self, id: i64, update: UserUpdate) -> Result<Option<User>, UserStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_auth::Role;

    #[tokio::test]
    async fn test_mock_user_repository_create_duplicate() {
        let mut mock = MockUserRepository::new();
        mock.expect_create()
            .withf(|u| u.email == "dup@example.com")
            .returning(|u| Err(UserStoreError::DuplicateEmail(u.email)));

        let result = mock
            .create(NewUser {
                email: "dup@example.com".to_string(),
                full_name: None,
                password_hash: "hash".to_string(),
                role: Role::User,
            })
            .await;
        assert!(matches!(result, Err(UserStoreError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_mock_user_repository_find_by_id_missing() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));

        assert!(mock.find_by_id(99).await.unwrap().is_none());
    }
}
