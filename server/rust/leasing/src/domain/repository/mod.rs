pub mod lease_repository;
pub mod payment_repository;

pub use lease_repository::LeaseRepository;
pub use payment_repository::PaymentRepository;

use rental_auth::IdentityContext;

/// PartyScope はリポジトリ問い合わせに渡す当事者条件。
/// 所有者・入居者のどちらでもない契約とその支払は存在しないものとして扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyScope {
    subject_id: i64,
}

impl PartyScope {
    pub fn of(ctx: &IdentityContext) -> Self {
        Self { subject_id: ctx.id }
    }

    pub fn subject_id(self) -> i64 {
        self.subject_id
    }
}

/// StoreError はデータストア操作のエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store error: {0}")]
    Internal(String),
}
