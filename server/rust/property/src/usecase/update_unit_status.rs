use std::sync::Arc;

use rental_auth::{IdentityContext, OwnerScope};

use super::PropertyError;
use crate::domain::entity::unit::Unit;
use crate::domain::repository::UnitRepository;

/// UpdateUnitStatusUseCase はユニットのステータスを変更する。
pub struct UpdateUnitStatusUseCase {
    unit_repo: Arc<dyn UnitRepository>,
}

impl UpdateUnitStatusUseCase {
    pub fn new(unit_repo: Arc<dyn UnitRepository>) -> Self {
        Self { unit_repo }
    }

    pub async fn execute(
        &self,
        ctx: &IdentityContext,
        id: i64,
        status: &str,
    ) -> Result<Unit, PropertyError> {
        let status = status.trim().to_uppercase();
        if status.is_empty() {
            return Err(PropertyError::Validation("status_value must not be empty".into()));
        }

        let unit = self
            .unit_repo
            .update_status(OwnerScope::of(ctx), id, &status)
            .await?
            .ok_or(PropertyError::UnitNotFound(id))?;

        tracing::info!(unit_id = unit.id, status = %unit.status, "unit status updated");
        Ok(unit)
    }
}
