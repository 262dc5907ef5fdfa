pub mod memory;
pub mod property_postgres;
pub mod unit_postgres;

pub use memory::InMemoryPropertyStore;
pub use property_postgres::PropertyPostgresRepository;
pub use unit_postgres::UnitPostgresRepository;

use crate::domain::repository::StoreError;

/// sqlx のエラーを StoreError に変換する。接続系は Unavailable とする。
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(err.to_string()),
        other => StoreError::Internal(other.to_string()),
    }
}
