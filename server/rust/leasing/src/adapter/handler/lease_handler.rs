use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rental_auth::IdentityContext;
use rental_server_common::ServiceError;
use serde::Deserialize;
use validator::Validate;

use super::{validated_body, AppState};
use crate::domain::entity::lease::{Lease, LeaseWithPayments};
use crate::usecase::CreateLeaseInput;

/// POST /api/v1/leases のリクエストボディ。owner_id は受け付けない。
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeaseRequest {
    pub unit_id: i64,
    pub tenant_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 0.0))]
    pub monthly_rent: f64,
    #[validate(length(min = 1, max = 20))]
    pub status: String,
}

/// GET /api/v1/leases
pub async fn list_leases(
    State(state): State<AppState>,
    ctx: IdentityContext,
) -> Result<Json<Vec<Lease>>, ServiceError> {
    let leases = state.list_leases_uc.execute(&ctx).await?;
    Ok(Json(leases))
}

/// POST /api/v1/leases（OWNER のみ）
pub async fn create_lease(
    State(state): State<AppState>,
    ctx: IdentityContext,
    body: Result<Json<CreateLeaseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Lease>), ServiceError> {
    let req = validated_body(body)?;

    let lease = state
        .create_lease_uc
        .execute(
            &ctx,
            CreateLeaseInput {
                unit_id: req.unit_id,
                tenant_id: req.tenant_id,
                start_date: req.start_date,
                end_date: req.end_date,
                monthly_rent: req.monthly_rent,
                status: req.status,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(lease)))
}

/// GET /api/v1/leases/{id}
pub async fn get_lease(
    State(state): State<AppState>,
    ctx: IdentityContext,
    Path(id): Path<i64>,
) -> Result<Json<LeaseWithPayments>, ServiceError> {
    let lease = state.get_lease_uc.execute(&ctx, id).await?;
    Ok(Json(lease))
}
