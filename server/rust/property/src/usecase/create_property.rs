use std::sync::Arc;

use rental_auth::IdentityContext;

use super::{required, PropertyError};
use crate::domain::entity::property::{NewProperty, Property};
use crate::domain::repository::PropertyRepository;

/// CreatePropertyInput は物件登録の入力。owner_id は含まない。
#[derive(Debug, Clone)]
pub struct CreatePropertyInput {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub property_type: String,
}

/// CreatePropertyUseCase は物件を登録する。OWNER ロールであることはルーターで保証する。
pub struct CreatePropertyUseCase {
    property_repo: Arc<dyn PropertyRepository>,
}

impl CreatePropertyUseCase {
    pub fn new(property_repo: Arc<dyn PropertyRepository>) -> Self {
        Self { property_repo }
    }

    pub async fn execute(
        &self,
        ctx: &IdentityContext,
        input: CreatePropertyInput,
    ) -> Result<Property, PropertyError> {
        let new_property = NewProperty {
            owner_id: ctx.id,
            name: required("name", &input.name)?,
            address: required("address", &input.address)?,
            description: input.description,
            property_type: required("property_type", &input.property_type)?.to_uppercase(),
        };

        let property = self.property_repo.create(new_property).await?;

        tracing::info!(property_id = property.id, owner_id = ctx.id, "property created");
        Ok(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::property_repository::MockPropertyRepository;
    use rental_auth::Role;

    #[tokio::test]
    async fn test_owner_id_comes_from_context() {
        let mut mock = MockPropertyRepository::new();
        mock.expect_create()
            .withf(|p| p.owner_id == 7 && p.property_type == "APARTMENT")
            .returning(|p| {
                Ok(Property {
                    id: 1,
                    owner_id: p.owner_id,
                    name: p.name,
                    address: p.address,
                    description: p.description,
                    property_type: p.property_type,
                    created_at: chrono::Utc::now(),
                })
            });

        let uc = CreatePropertyUseCase::new(Arc::new(mock));
        let property = uc
            .execute(
                &IdentityContext::new(7, Role::Owner),
                CreatePropertyInput {
                    name: " Sunset Flats ".to_string(),
                    address: "1 Main St".to_string(),
                    description: None,
                    property_type: "apartment".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(property.owner_id, 7);
        assert_eq!(property.name, "Sunset Flats");
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let mut mock = MockPropertyRepository::new();
        mock.expect_create().never();

        let uc = CreatePropertyUseCase::new(Arc::new(mock));
        let result = uc
            .execute(
                &IdentityContext::new(7, Role::Owner),
                CreatePropertyInput {
                    name: "   ".to_string(),
                    address: "1 Main St".to_string(),
                    description: None,
                    property_type: "HOUSE".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(PropertyError::Validation(_))));
    }
}
