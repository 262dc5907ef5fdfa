use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use rental_auth::Role;
use rental_server_common::error::auth as codes;
use rental_server_common::{ErrorDetail, ServiceError};
use serde::Deserialize;
use validator::Validate;

use super::user_handler::UserResponse;
use super::{validated_body, AppState, SERVICE};
use crate::usecase::{LoginError, LoginInput, LoginOutput, RegisterUserError, RegisterUserInput};

/// POST /api/v1/auth/register のリクエストボディ。
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "must be 1 to 128 characters"))]
    pub password: String,
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    pub role: Option<String>,
}

/// POST /api/v1/auth/login のリクエストボディ。
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl From<RegisterUserError> for ServiceError {
    fn from(err: RegisterUserError) -> Self {
        match err {
            RegisterUserError::RoleNotAllowed(_) => {
                ServiceError::bad_request(SERVICE, err.to_string()).with_code(codes::role_not_allowed())
            }
            RegisterUserError::DuplicateEmail(_) => {
                ServiceError::conflict(SERVICE, "Email already registered")
                    .with_code(codes::email_conflict())
            }
            RegisterUserError::StoreUnavailable(_) => {
                ServiceError::store_unavailable(SERVICE, err.to_string())
            }
            RegisterUserError::Internal(_) => ServiceError::internal(SERVICE, err.to_string()),
        }
    }
}

impl From<LoginError> for ServiceError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => {
                ServiceError::bad_request(SERVICE, "Incorrect email or password")
                    .with_code(codes::invalid_credentials())
            }
            LoginError::StoreUnavailable(_) => {
                ServiceError::store_unavailable(SERVICE, err.to_string())
            }
            LoginError::Internal(_) => ServiceError::internal(SERVICE, err.to_string()),
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ServiceError> {
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
        .register_user_uc
        .execute(RegisterUserInput {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginOutput>, ServiceError> {
    let req = validated_body(body)?;

    let output = state
        .login_uc
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(output))
}
