pub mod auth_handler;
pub mod user_handler;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::middleware;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use rental_auth::{auth_middleware, require_role, AuthState, Role};
use rental_server_common::ServiceError;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use validator::Validate;

use crate::domain::repository::UserRepository;
use crate::usecase::{GetUserUseCase, LoginUseCase, RegisterUserUseCase, UpdateUserUseCase};

/// エラーコードに使うサービス名。
pub(crate) const SERVICE: &str = "AUTH";

const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub register_user_uc: Arc<RegisterUserUseCase>,
    pub login_uc: Arc<LoginUseCase>,
    pub get_user_uc: Arc<GetUserUseCase>,
    pub update_user_uc: Arc<UpdateUserUseCase>,
    pub auth: AuthState,
    pub db_pool: Option<sqlx::PgPool>,
}

impl AppState {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        issuer: Arc<rental_auth::TokenIssuer>,
        verifier: Arc<rental_auth::TokenVerifier>,
        db_pool: Option<sqlx::PgPool>,
    ) -> Self {
        Self {
            register_user_uc: Arc::new(RegisterUserUseCase::new(user_repo.clone())),
            login_uc: Arc::new(LoginUseCase::new(user_repo.clone(), issuer)),
            get_user_uc: Arc::new(GetUserUseCase::new(user_repo.clone())),
            update_user_uc: Arc::new(UpdateUserUseCase::new(user_repo)),
            auth: AuthState::new(verifier),
            db_pool,
        }
    }
}

/// Build the REST API router.
pub fn router(state: AppState) -> Router {
    // Admin endpoints: require ADMIN role
    let admin_routes = Router::new()
        .route("/api/v1/users/{id}", patch(user_handler::update_user))
        .route_layer(middleware::from_fn(require_role(ADMIN_ONLY)));

    // Protected routes share auth_middleware for Bearer token validation
    let protected = Router::new()
        .route("/api/v1/users/me", get(user_handler::get_me))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    // Public endpoints (no auth required)
    let public = Router::new()
        .route("/api/v1/auth/register", post(auth_handler::register))
        .route("/api/v1/auth/login", post(auth_handler::login));

    Router::new()
        .merge(protected)
        .merge(public)
        .merge(rental_server_common::health::health_routes(
            state.db_pool.clone(),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON ボディの取り出しと入力検証を行う。失敗は 400 に変換する。
pub(crate) fn validated_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError>
where
    T: DeserializeOwned + Validate,
{
    let Json(value) = body.map_err(|e| ServiceError::bad_request(SERVICE, e.body_text()))?;
    value
        .validate()
        .map_err(|e| ServiceError::from_validation(SERVICE, &e))?;
    Ok(value)
}
