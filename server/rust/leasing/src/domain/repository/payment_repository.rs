use async_trait::async_trait;

use super::{PartyScope, StoreError};
use crate::domain::entity::payment::{NewPayment, Payment};

/// PaymentRepository は支払記録の永続化を抽象化するトレイト。
/// 支払の可視性は親契約の当事者で判定する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// スコープ内契約の支払を返す。lease_id 指定時はその契約に限る。
    async fn list(
        &self,
        scope: PartyScope,
        lease_id: Option<i64>,
    ) -> Result<Vec<Payment>, StoreError>;

    /// 親契約がスコープ内の場合のみ作成する。スコープ外なら None を返す。
    async fn create(
        &self,
        scope: PartyScope,
        payment: NewPayment,
    ) -> Result<Option<Payment>, StoreError>;

    async fn find(&self, scope: PartyScope, id: i64) -> Result<Option<Payment>, StoreError>;
}
