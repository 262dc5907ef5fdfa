use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use rental_auth::IdentityContext;
use rental_server_common::ServiceError;
use serde::Deserialize;
use validator::Validate;

use super::{validated_body, AppState};
use crate::domain::entity::property::{Property, PropertyWithUnits};
use crate::usecase::CreatePropertyInput;

/// POST /api/v1/properties のリクエストボディ。owner_id は受け付けない。
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub property_type: String,
}

/// GET /api/v1/properties
pub async fn list_properties(
    State(state): State<AppState>,
    ctx: IdentityContext,
) -> Result<Json<Vec<Property>>, ServiceError> {
    let properties = state.list_properties_uc.execute(&ctx).await?;
    Ok(Json(properties))
}

/// POST /api/v1/properties（OWNER のみ）
pub async fn create_property(
    State(state): State<AppState>,
    ctx: IdentityContext,
    body: Result<Json<CreatePropertyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Property>), ServiceError> {
    let req = validated_body(body)?;

    let property = state
        .create_property_uc
        .execute(
            &ctx,
            CreatePropertyInput {
                name: req.name,
                address: req.address,
                description: req.description,
                property_type: req.property_type,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(property)))
}

/// GET /api/v1/properties/{id}
pub async fn get_property(
    State(state): State<AppState>,
    ctx: IdentityContext,
    Path(id): Path<i64>,
) -> Result<Json<PropertyWithUnits>, ServiceError> {
    let property = state.get_property_uc.execute(&ctx, id).await?;
    Ok(Json(property))
}

/// DELETE /api/v1/properties/{id}（OWNER のみ）。所属ユニットも削除される。
pub async fn delete_property(
    State(state): State<AppState>,
    ctx: IdentityContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    state.delete_property_uc.execute(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
