use std::sync::Arc;

use rental_auth::{IdentityContext, OwnerScope};

use super::PropertyError;
use crate::domain::entity::property::PropertyWithUnits;
use crate::domain::repository::{PropertyRepository, UnitRepository};

/// GetPropertyUseCase は所有物件の詳細をユニット付きで返す。
pub struct GetPropertyUseCase {
    property_repo: Arc<dyn PropertyRepository>,
    unit_repo: Arc<dyn UnitRepository>,
}

impl GetPropertyUseCase {
    pub fn new(
        property_repo: Arc<dyn PropertyRepository>,
        unit_repo: Arc<dyn UnitRepository>,
    ) -> Self {
        Self {
            property_repo,
            unit_repo,
        }
    }

    pub async fn execute(
        &self,
        ctx: &IdentityContext,
        id: i64,
    ) -> Result<PropertyWithUnits, PropertyError> {
        let scope = OwnerScope::of(ctx);
        let property = self
            .property_repo
            .find(scope, id)
            .await?
            .ok_or(PropertyError::PropertyNotFound(id))?;
        let units = self.unit_repo.list(scope, Some(property.id)).await?;

        Ok(PropertyWithUnits { property, units })
    }
}
