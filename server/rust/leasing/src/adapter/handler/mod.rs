pub mod lease_handler;
pub mod payment_handler;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use rental_auth::{auth_middleware, require_role, AuthState, Role, TokenVerifier};
use rental_server_common::error::leasing as codes;
use rental_server_common::ServiceError;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use validator::Validate;

use crate::domain::repository::{LeaseRepository, PaymentRepository};
use crate::usecase::{
    CreateLeaseUseCase, CreatePaymentUseCase, GetLeaseUseCase, GetPaymentUseCase, LeasingError,
    ListLeasesUseCase, ListPaymentsUseCase,
};

pub(crate) const SERVICE: &str = "LEASING";

const OWNER_ONLY: &[Role] = &[Role::Owner];

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub list_leases_uc: Arc<ListLeasesUseCase>,
    pub create_lease_uc: Arc<CreateLeaseUseCase>,
    pub get_lease_uc: Arc<GetLeaseUseCase>,
    pub list_payments_uc: Arc<ListPaymentsUseCase>,
    pub create_payment_uc: Arc<CreatePaymentUseCase>,
    pub get_payment_uc: Arc<GetPaymentUseCase>,
    pub auth: AuthState,
    pub db_pool: Option<sqlx::PgPool>,
}

impl AppState {
    pub fn new(
        lease_repo: Arc<dyn LeaseRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        verifier: Arc<TokenVerifier>,
        db_pool: Option<sqlx::PgPool>,
    ) -> Self {
        Self {
            list_leases_uc: Arc::new(ListLeasesUseCase::new(lease_repo.clone())),
            create_lease_uc: Arc::new(CreateLeaseUseCase::new(lease_repo.clone())),
            get_lease_uc: Arc::new(GetLeaseUseCase::new(lease_repo, payment_repo.clone())),
            list_payments_uc: Arc::new(ListPaymentsUseCase::new(payment_repo.clone())),
            create_payment_uc: Arc::new(CreatePaymentUseCase::new(payment_repo.clone())),
            get_payment_uc: Arc::new(GetPaymentUseCase::new(payment_repo)),
            auth: AuthState::new(verifier),
            db_pool,
        }
    }
}

/// Build the REST API router.
pub fn router(state: AppState) -> Router {
    // Lease creation: OWNER only
    let owner_routes = Router::new()
        .route("/api/v1/leases", post(lease_handler::create_lease))
        .route_layer(middleware::from_fn(require_role(OWNER_ONLY)));

    // Party-scoped endpoints: any authenticated caller
    let party_routes = Router::new()
        .route("/api/v1/leases", get(lease_handler::list_leases))
        .route("/api/v1/leases/{id}", get(lease_handler::get_lease))
        .route(
            "/api/v1/payments",
            get(payment_handler::list_payments).post(payment_handler::create_payment),
        )
        .route("/api/v1/payments/{id}", get(payment_handler::get_payment));

    let protected = Router::new()
        .merge(owner_routes)
        .merge(party_routes)
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

impl From<LeasingError> for ServiceError {
    fn from(err: LeasingError) -> Self {
        match err {
            LeasingError::LeaseNotFound(_) => ServiceError::not_found(SERVICE, "Lease not found")
                .with_code(codes::lease_not_found()),
            LeasingError::PaymentNotFound(_) => {
                ServiceError::not_found(SERVICE, "Payment not found")
                    .with_code(codes::payment_not_found())
            }
            LeasingError::InvalidPeriod => {
                ServiceError::bad_request(SERVICE, err.to_string())
                    .with_code(codes::invalid_period())
            }
            LeasingError::Validation(msg) => ServiceError::bad_request(SERVICE, msg),
            LeasingError::StoreUnavailable(_) => {
                ServiceError::store_unavailable(SERVICE, err.to_string())
            }
            LeasingError::Internal(_) => ServiceError::internal(SERVICE, err.to_string()),
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
