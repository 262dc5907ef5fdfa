pub mod create_lease;
pub mod create_payment;
pub mod get_lease;
pub mod get_payment;
pub mod list_leases;
pub mod list_payments;

pub use create_lease::{CreateLeaseInput, CreateLeaseUseCase};
pub use create_payment::{CreatePaymentInput, CreatePaymentUseCase};
pub use get_lease::GetLeaseUseCase;
pub use get_payment::GetPaymentUseCase;
pub use list_leases::ListLeasesUseCase;
pub use list_payments::ListPaymentsUseCase;

use crate::domain::repository::StoreError;

/// LeasingError は契約・支払系ユースケースの共通エラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum LeasingError {
    #[error("lease not found: {0}")]
    LeaseNotFound(i64),

    #[error("payment not found: {0}")]
    PaymentNotFound(i64),

    #[error("end_date must not be before start_date")]
    InvalidPeriod,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for LeasingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => LeasingError::StoreUnavailable(msg),
            StoreError::Internal(msg) => LeasingError::Internal(msg),
        }
    }
}

/// ステータス文字列を正規化する（前後空白除去・大文字化）。空なら Validation エラー。
pub(crate) fn normalize_status(status: &str) -> Result<String, LeasingError> {
    let status = status.trim().to_uppercase();
    if status.is_empty() {
        return Err(LeasingError::Validation("status must not be empty".into()));
    }
    Ok(status)
}
