pub mod property_handler;
pub mod unit_handler;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::middleware;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use rental_auth::{auth_middleware, require_role, AuthState, Role, TokenVerifier};
use rental_server_common::error::property as codes;
use rental_server_common::ServiceError;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use validator::Validate;

use crate::domain::repository::{PropertyRepository, UnitRepository};
use crate::usecase::{
    CreatePropertyUseCase, CreateUnitUseCase, DeletePropertyUseCase, GetPropertyUseCase,
    GetUnitUseCase, ListPropertiesUseCase, ListUnitsUseCase, PropertyError,
    UpdateUnitStatusUseCase,
};

pub(crate) const SERVICE: &str = "PROPERTY";

const OWNER_ONLY: &[Role] = &[Role::Owner];

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub list_properties_uc: Arc<ListPropertiesUseCase>,
    pub create_property_uc: Arc<CreatePropertyUseCase>,
    pub get_property_uc: Arc<GetPropertyUseCase>,
    pub delete_property_uc: Arc<DeletePropertyUseCase>,
    pub list_units_uc: Arc<ListUnitsUseCase>,
    pub create_unit_uc: Arc<CreateUnitUseCase>,
    pub get_unit_uc: Arc<GetUnitUseCase>,
    pub update_unit_status_uc: Arc<UpdateUnitStatusUseCase>,
    pub auth: AuthState,
    pub db_pool: Option<sqlx::PgPool>,
}

impl AppState {
    pub fn new(
        property_repo: Arc<dyn PropertyRepository>,
        unit_repo: Arc<dyn UnitRepository>,
        verifier: Arc<TokenVerifier>,
        db_pool: Option<sqlx::PgPool>,
    ) -> Self {
        Self {
            list_properties_uc: Arc::new(ListPropertiesUseCase::new(property_repo.clone())),
            create_property_uc: Arc::new(CreatePropertyUseCase::new(property_repo.clone())),
            get_property_uc: Arc::new(GetPropertyUseCase::new(
                property_repo.clone(),
                unit_repo.clone(),
            )),
            delete_property_uc: Arc::new(DeletePropertyUseCase::new(property_repo)),
            list_units_uc: Arc::new(ListUnitsUseCase::new(unit_repo.clone())),
            create_unit_uc: Arc::new(CreateUnitUseCase::new(unit_repo.clone())),
            get_unit_uc: Arc::new(GetUnitUseCase::new(unit_repo.clone())),
            update_unit_status_uc: Arc::new(UpdateUnitStatusUseCase::new(unit_repo)),
            auth: AuthState::new(verifier),
            db_pool,
        }
    }
}

/// Build the REST API router.
pub fn router(state: AppState) -> Router {
    // Mutating endpoints: require OWNER role
    let owner_routes = Router::new()
        .route("/api/v1/properties", post(property_handler::create_property))
        .route(
            "/api/v1/properties/{id}",
            axum::routing::delete(property_handler::delete_property),
        )
        .route("/api/v1/units", post(unit_handler::create_unit))
        .route(
            "/api/v1/units/{id}/status",
            patch(unit_handler::update_unit_status),
        )
        .route_layer(middleware::from_fn(require_role(OWNER_ONLY)));

    // Read endpoints: any authenticated caller, results are owner-scoped
    let read_routes = Router::new()
        .route("/api/v1/properties", get(property_handler::list_properties))
        .route("/api/v1/properties/{id}", get(property_handler::get_property))
        .route("/api/v1/units", get(unit_handler::list_units))
        .route("/api/v1/units/{id}", get(unit_handler::get_unit));

    let protected = Router::new()
        .merge(owner_routes)
        .merge(read_routes)
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(protected)
        .merge(rental_server_common::health::health_routes(
            state.db_pool.clone(),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl From<PropertyError> for ServiceError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::PropertyNotFound(_) => {
                ServiceError::not_found(SERVICE, "Property not found")
                    .with_code(codes::property_not_found())
            }
            PropertyError::UnitNotFound(_) => ServiceError::not_found(SERVICE, "Unit not found")
                .with_code(codes::unit_not_found()),
            PropertyError::Validation(msg) => ServiceError::bad_request(SERVICE, msg),
            PropertyError::StoreUnavailable(_) => {
                ServiceError::store_unavailable(SERVICE, err.to_string())
            }
            PropertyError::Internal(_) => ServiceError::internal(SERVICE, err.to_string()),
        }
    }
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
