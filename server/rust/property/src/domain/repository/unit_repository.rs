use async_trait::async_trait;
use rental_auth::OwnerScope;

use super::StoreError;
use crate::domain::entity::unit::{NewUnit, Unit};

/// UnitRepository はユニットの永続化を抽象化するトレイト。
/// ユニットの所有者は親物件の owner_id で判定する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitRepository: Send + Sync {
    /// スコープ内物件のユニットを返す。property_id 指定時はその物件に限る。
    async fn list(
        &self,
        scope: OwnerScope,
        property_id: Option<i64>,
    ) -> Result<Vec<Unit>, StoreError>;

    /// 親物件がスコープ内の場合のみ作成する。スコープ外なら None を返す。
    async fn create(&self, scope: OwnerScope, unit: NewUnit) -> Result<Option<Unit>, StoreError>;

    async fn find(&self, scope: OwnerScope, id: i64) -> Result<Option<Unit>, StoreError>;

    async fn update_status(
        &self,
        scope: OwnerScope,
        id: i64,
        status: &str,
    ) -> Result<Option<Unit>, StoreError>;
}
