use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User, UserUpdate};
use crate::domain::repository::{UserRepository, UserStoreError};

#[derive(Default)]
struct Store {
    next_id: i64,
    users: HashMap<i64, User>,
    /// email -> id
    by_email: HashMap<String, i64>,
}

/// InMemoryUserRepository はインメモリの Identity Store。
/// DB 未設定時（開発モード）とテストで使用する。
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let store = self.store.read().await;
        Ok(store
            .by_email
            .get(email)
            .and_then(|id| store.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        // 重複確認と挿入は同一の書き込みロック内で行う
        let mut store = self.store.write().await;
        if store.by_email.contains_key(&user.email) {
            return Err(UserStoreError::DuplicateEmail(user.email));
        }

        store.next_id += 1;
        let created = User {
            id: store.next_id,
            email: user.email,
            full_name: user.full_name,
            password_hash: user.password_hash,
            role: user.role,
            is_active: true,
            created_at: chrono::Utc::now(),
        };
        store.by_email.insert(created.email.clone(), created.id);
        store.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, update: UserUpdate) -> Result<Option<User>, UserStoreError> {
        let mut store = self.store.write().await;
        Ok(store.users.get_mut(&id).map(|user| {
            update.apply(user);
            user.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_auth::Role;
    use std::sync::Arc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            full_name: None,
            password_hash: "hash".to_string(),
            role: Role::Tenant,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("a@example.com")).await.unwrap();
        assert_eq!(created.id, 1);
        assert!(created.is_active);

        let found = repo.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(created));
        assert!(repo.find_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("a@example.com")).await.unwrap();
        let result = repo.create(new_user("a@example.com")).await;
        assert!(matches!(result, Err(UserStoreError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_concurrent_create_single_winner() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.create(new_user("race@example.com")).await
            }));
        }

        let mut ok = 0;
        let mut dup = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(UserStoreError::DuplicateEmail(_)) => dup += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(dup, 15);
    }

    #[tokio::test]
    async fn test_update_user() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("a@example.com")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UserUpdate {
                    role: Some(Role::Owner),
                    is_active: Some(false),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.role, Role::Owner);
        assert!(!updated.is_active);

        assert!(repo
            .update(999, UserUpdate::default())
            .await
            .unwrap()
            .is_none());
    }
}
