use async_trait::async_trait;
use rental_auth::OwnerScope;

use super::StoreError;
use crate::domain::entity::property::{NewProperty, Property};

/// PropertyRepository は物件の永続化を抽象化するトレイト。
///
/// 参照・削除はすべて OwnerScope で絞り込む。スコープ外の物件は存在しないものとして扱う。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn list(&self, scope: OwnerScope) -> Result<Vec<Property>, StoreError>;

    async fn create(&self, property: NewProperty) -> Result<Property, StoreError>;

    async fn find(&self, scope: OwnerScope, id: i64) -> Result<Option<Property>, StoreError>;

    /// 物件と所属ユニットを削除する。削除した場合は true を返す。
    async fn delete(&self, scope: OwnerScope, id: i64) -> Result<bool, StoreError>;
}
