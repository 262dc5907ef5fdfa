use async_trait::async_trait;

use super::{PartyScope, StoreError};
use crate::domain::entity::lease::{Lease, NewLease};

/// LeaseRepository は賃貸契約の永続化を抽象化するトレイト。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaseRepository: Send + Sync {
    /// 呼び出し元が当事者である契約を返す。
    async fn list(&self, scope: PartyScope) -> Result<Vec<Lease>, StoreError>;

    async fn create(&self, lease: NewLease) -> Result<Lease, StoreError>;

    async fn find(&self, scope: PartyScope, id: i64) -> Result<Option<Lease>, StoreError>;
}
