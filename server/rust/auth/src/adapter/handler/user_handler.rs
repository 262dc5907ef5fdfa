use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use rental_auth::{IdentityContext, Role};
use rental_server_common::error::auth as codes;
use rental_server_common::{ErrorDetail, ServiceError};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validated_body, AppState, SERVICE};
use crate::domain::entity::user::{User, UserUpdate};
use crate::usecase::{GetUserError, UpdateUserError};

/// UserResponse は API で返す利用者表現。password_hash は含めない。
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// PATCH /api/v1/users/{id} のリクエストボディ。
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl From<GetUserError> for ServiceError {
    fn from(err: GetUserError) -> Self {
        match err {
            GetUserError::NotFound(_) => {
                ServiceError::not_found(SERVICE, "User not found").with_code(codes::user_not_found())
            }
            GetUserError::StoreUnavailable(_) => {
                ServiceError::store_unavailable(SERVICE, err.to_string())
            }
            GetUserError::Internal(_) => ServiceError::internal(SERVICE, err.to_string()),
        }
    }
}

impl From<UpdateUserError> for ServiceError {
    fn from(err: UpdateUserError) -> Self {
        match err {
            UpdateUserError::NotFound(_) => {
                ServiceError::not_found(SERVICE, "User not found").with_code(codes::user_not_found())
            }
            UpdateUserError::EmptyUpdate => ServiceError::bad_request(SERVICE, err.to_string()),
            UpdateUserError::StoreUnavailable(_) => {
                ServiceError::store_unavailable(SERVICE, err.to_string())
            }
            UpdateUserError::Internal(_) => ServiceError::internal(SERVICE, err.to_string()),
        }
    }
}

/// GET /api/v1/users/me
pub async fn get_me(
    State(state): State<AppState>,
    ctx: IdentityContext,
) -> Result<Json<UserResponse>, ServiceError> {
    let user = state.get_user_uc.execute(ctx.id).await?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/{id}（ADMIN のみ）
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ServiceError> {
    let req = validated_body(body)?;

    let role = req
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .map_err(|e| {
            ServiceError::bad_request_with_details(
                SERVICE,
                "validation failed",
                vec![ErrorDetail::new("role", "unknown_role", e.to_string())],
            )
        })?;

    let user = state
        .update_user_uc
        .execute(
            id,
            UserUpdate {
                role,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(user.into()))
}
