use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rental_auth::IdentityContext;
use rental_server_common::ServiceError;
use serde::Deserialize;
use validator::Validate;

use super::{validated_body, AppState};
use crate::domain::entity::payment::Payment;
use crate::usecase::CreatePaymentInput;

/// POST /api/v1/payments のリクエストボディ。
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    pub lease_id: i64,
    pub payment_date: NaiveDate,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    #[validate(length(min = 1, max = 20))]
    pub status: String,
    #[validate(length(max = 20))]
    pub method: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListPaymentsQuery {
    pub lease_id: Option<i64>,
}

/// GET /api/v1/payments?lease_id=
pub async fn list_payments(
    State(state): State<AppState>,
    ctx: IdentityContext,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<Vec<Payment>>, ServiceError> {
    let payments = state.list_payments_uc.execute(&ctx, query.lease_id).await?;
    Ok(Json(payments))
}

/// POST /api/v1/payments（契約の当事者のみ）
pub async fn create_payment(
    State(state): State<AppState>,
    ctx: IdentityContext,
    body: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Payment>), ServiceError> {
    let req = validated_body(body)?;

    let payment = state
        .create_payment_uc
        .execute(
            &ctx,
            CreatePaymentInput {
                lease_id: req.lease_id,
                payment_date: req.payment_date,
                amount: req.amount,
                status: req.status,
                method: req.method,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /api/v1/payments/{id}
pub async fn get_payment(
    State(state): State<AppState>,
    ctx: IdentityContext,
    Path(id): Path<i64>,
) -> Result<Json<Payment>, ServiceError> {
    let payment = state.get_payment_uc.execute(&ctx, id).await?;
    Ok(Json(payment))
}
