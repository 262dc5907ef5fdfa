pub mod create_property;
pub mod create_unit;
pub mod delete_property;
pub mod get_property;
pub mod get_unit;
pub mod list_properties;
pub mod list_units;
pub mod update_unit_status;

pub use create_property::{CreatePropertyInput, CreatePropertyUseCase};
pub use create_unit::{CreateUnitInput, CreateUnitUseCase};
pub use delete_property::DeletePropertyUseCase;
pub use get_property::GetPropertyUseCase;
pub use get_unit::GetUnitUseCase;
pub use list_properties::ListPropertiesUseCase;
pub use list_units::ListUnitsUseCase;
pub use update_unit_status::UpdateUnitStatusUseCase;

use crate::domain::repository::StoreError;

/// PropertyError は物件・ユニット系ユースケースの共通エラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("property not found: {0}")]
    PropertyNotFound(i64),

    #[error("unit not found: {0}")]
    UnitNotFound(i64),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for PropertyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => PropertyError::StoreUnavailable(msg),
            StoreError::Internal(msg) => PropertyError::Internal(msg),
        }
    }
}

/// 前後の空白を除いた値を返す。空になる場合は Validation エラー。
pub(crate) fn required(field: &str, value: &str) -> Result<String, PropertyError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PropertyError::Validation(format!("{field} must not be blank")));
    }
    Ok(value.to_string())
}
