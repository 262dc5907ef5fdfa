use std::sync::Arc;

use rental_auth::{IdentityContext, OwnerScope};

use super::PropertyError;
use crate::domain::entity::property::Property;
use crate::domain::repository::PropertyRepository;

/// ListPropertiesUseCase は呼び出し元が所有する物件一覧を返す。
pub struct ListPropertiesUseCase {
    property_repo: Arc<dyn PropertyRepository>,
}

impl ListPropertiesUseCase {
    pub fn new(property_repo: Arc<dyn PropertyRepository>) -> Self {
        Self { property_repo }
    }

    pub async fn execute(&self, ctx: &IdentityContext) -> Result<Vec<Property>, PropertyError> {
        Ok(self.property_repo.list(OwnerScope::of(ctx)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::property_repository::MockPropertyRepository;
    use rental_auth::Role;

    #[tokio::test]
    async fn test_list_is_scoped_to_caller() {
        let mut mock = MockPropertyRepository::new();
        mock.expect_list()
            .withf(|scope| scope.owner_id() == 42)
            .returning(|_| Ok(vec![]));

        let uc = ListPropertiesUseCase::new(Arc::new(mock));
        let result = uc.execute(&IdentityContext::new(42, Role::Owner)).await;
        assert!(result.unwrap().is_empty());
    }
}
