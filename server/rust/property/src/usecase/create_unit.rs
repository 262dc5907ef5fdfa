use std::sync::Arc;

use rental_auth::{IdentityContext, OwnerScope};

use super::{required, PropertyError};
use crate::domain::entity::unit::{NewUnit, Unit, DEFAULT_UNIT_STATUS};
use crate::domain::repository::UnitRepository;

#[derive(Debug, Clone)]
pub struct CreateUnitInput {
    pub property_id: i64,
    pub unit_number: String,
    pub area: Option<f64>,
    pub floor: Option<i32>,
    pub status: Option<String>,
    pub monthly_rent: f64,
}

/// CreateUnitUseCase はユニットを登録する。親物件が呼び出し元の所有でなければ NotFound。
pub struct CreateUnitUseCase {
    unit_repo: Arc<dyn UnitRepository>,
}

impl CreateUnitUseCase {
    pub fn new(unit_repo: Arc<dyn UnitRepository>) -> Self {
        Self { unit_repo }
    }

    pub async fn execute(
        &self,
        ctx: &IdentityContext,
        input: CreateUnitInput,
    ) -> Result<Unit, PropertyError> {
        let unit_number = required("unit_number", &input.unit_number)?;
        let status = input
            .status
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_UNIT_STATUS.to_string());

        let unit = self
            .unit_repo
            .create(
                OwnerScope::of(ctx),
                NewUnit {
                    property_id: input.property_id,
                    unit_number,
                    area: input.area,
                    floor: input.floor,
                    status,
                    monthly_rent: input.monthly_rent,
                },
            )
            .await?
            .ok_or(PropertyError::PropertyNotFound(input.property_id))?;

        tracing::info!(unit_id = unit.id, property_id = unit.property_id, "unit created");
        Ok(unit)
    }
}
