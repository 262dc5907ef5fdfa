use std::sync::Arc;

use rental_auth::{IdentityContext, OwnerScope};

use super::PropertyError;
use crate::domain::repository::PropertyRepository;

/// DeletePropertyUseCase は所有物件を削除する。所属ユニットも削除される。
pub struct DeletePropertyUseCase {
    property_repo: Arc<dyn PropertyRepository>,
}

impl DeletePropertyUseCase {
    pub fn new(property_repo: Arc<dyn PropertyRepository>) -> Self {
        Self { property_repo }
    }

    pub async fn execute(&self, ctx: &IdentityContext, id: i64) -> Result<(), PropertyError> {
        if !self.property_repo.delete(OwnerScope::of(ctx), id).await? {
            return Err(PropertyError::PropertyNotFound(id));
        }
        tracing::info!(property_id = id, owner_id = ctx.id, "property deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::property_repository::MockPropertyRepository;
    use crate::domain::repository::StoreError;
    use rental_auth::Role;

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock = MockPropertyRepository::new();
        mock.expect_delete().returning(|_, _| Ok(false));

        let uc = DeletePropertyUseCase::new(Arc::new(mock));
        let result = uc.execute(&IdentityContext::new(1, Role::Owner), 5).await;
        assert!(matches!(result, Err(PropertyError::PropertyNotFound(5))));
    }

    #[tokio::test]
    async fn test_delete_store_unavailable() {
        let mut mock = MockPropertyRepository::new();
        mock.expect_delete()
            .returning(|_, _| Err(StoreError::Unavailable("pool timed out".into())));

        let uc = DeletePropertyUseCase::new(Arc::new(mock));
        let result = uc.execute(&IdentityContext::new(1, Role::Owner), 5).await;
        assert!(matches!(result, Err(PropertyError::StoreUnavailable(_))));
    }
}
