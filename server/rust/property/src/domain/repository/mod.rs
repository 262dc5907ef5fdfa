pub mod property_repository;
pub mod unit_repository;

pub use property_repository::PropertyRepository;
pub use unit_repository::UnitRepository;

/// StoreError はデータストア操作のエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store error: {0}")]
    Internal(String),
}
