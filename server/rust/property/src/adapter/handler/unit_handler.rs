use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use rental_auth::IdentityContext;
use rental_server_common::ServiceError;
use serde::Deserialize;
use validator::Validate;

use super::{validated_body, AppState};
use crate::domain::entity::unit::Unit;
use crate::usecase::CreateUnitInput;

/// POST /api/v1/units のリクエストボディ。
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUnitRequest {
    pub property_id: i64,
    #[validate(length(min = 1, max = 50))]
    pub unit_number: String,
    #[validate(range(min = 0.0))]
    pub area: Option<f64>,
    pub floor: Option<i32>,
    pub status: Option<String>,
    #[validate(range(min = 0.0))]
    pub monthly_rent: f64,
}

#[derive(Debug, Deserialize)]
pub struct ListUnitsQuery {
    pub property_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusQuery {
    pub status_value: String,
}

/// GET /api/v1/units?property_id=
pub async fn list_units(
    State(state): State<AppState>,
    ctx: IdentityContext,
    Query(query): Query<ListUnitsQuery>,
) -> Result<Json<Vec<Unit>>, ServiceError> {
    let units = state.list_units_uc.execute(&ctx, query.property_id).await?;
    Ok(Json(units))
}

/// POST /api/v1/units（OWNER のみ）
pub async fn create_unit(
    State(state): State<AppState>,
    ctx: IdentityContext,
    body: Result<Json<CreateUnitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Unit>), ServiceError> {
    let req = validated_body(body)?;

    let unit = state
        .create_unit_uc
        .execute(
            &ctx,
            CreateUnitInput {
                property_id: req.property_id,
                unit_number: req.unit_number,
                area: req.area,
                floor: req.floor,
                status: req.status,
                monthly_rent: req.monthly_rent,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(unit)))
}

/// GET /api/v1/units/{id}
pub async fn get_unit(
    State(state): State<AppState>,
    ctx: IdentityContext,
    Path(id): Path<i64>,
) -> Result<Json<Unit>, ServiceError> {
    let unit = state.get_unit_uc.execute(&ctx, id).await?;
    Ok(Json(unit))
}

/// PATCH /api/v1/units/{id}/status?status_value=（OWNER のみ）
pub async fn update_unit_status(
    State(state): State<AppState>,
    ctx: IdentityContext,
    Path(id): Path<i64>,
    Query(query): Query<UpdateStatusQuery>,
) -> Result<Json<Unit>, ServiceError> {
    let unit = state
        .update_unit_status_uc
        .execute(&ctx, id, &query.status_value)
        .await?;
    Ok(Json(unit))
}
