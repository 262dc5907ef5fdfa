use std::sync::Arc;

use rental_auth::{IdentityContext, OwnerScope};

use super::PropertyError;
use crate::domain::entity::unit::Unit;
use crate::domain::repository::UnitRepository;

/// GetUnitUseCase は所有物件に属するユニットを返す。
pub struct GetUnitUseCase {
    unit_repo: Arc<dyn UnitRepository>,
}

impl GetUnitUseCase {
    pub fn new(unit_repo: Arc<dyn UnitRepository>) -> Self {
        Self { unit_repo }
    }

    pub async fn execute(&self, ctx: &IdentityContext, id: i64) -> Result<Unit, PropertyError> {
        self.unit_repo
            .find(OwnerScope::of(ctx), id)
            .await?
            .ok_or(PropertyError::UnitNotFound(id))
    }
}
