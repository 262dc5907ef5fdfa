use std::sync::Arc;

use rental_auth::{IdentityContext, OwnerScope};

use super::PropertyError;
use crate::domain::entity::unit::Unit;
use crate::domain::repository::UnitRepository;

/// ListUnitsUseCase は所有物件のユニット一覧を返す。
pub struct ListUnitsUseCase {
    unit_repo: Arc<dyn UnitRepository>,
}

impl ListUnitsUseCase {
    pub fn new(unit_repo: Arc<dyn UnitRepository>) -> Self {
        Self { unit_repo }
    }

    pub async fn execute(
        &self,
        ctx: &IdentityContext,
        property_id: Option<i64>,
    ) -> Result<Vec<Unit>, PropertyError> {
        Ok(self
            .unit_repo
            .list(OwnerScope::of(ctx), property_id)
            .await?)
    }
}
