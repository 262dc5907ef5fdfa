use chrono::{DateTime, Utc};
use serde::Serialize;

use super::unit::Unit;

/// Property は所有者が登録する物件を表す。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: i64,
    /// 登録時のトークンの subject。リクエストボディからは受け取らない。
    pub owner_id: i64,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    /// APARTMENT, HOUSE, OFFICE など
    pub property_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub owner_id: i64,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub property_type: String,
}

/// PropertyWithUnits は物件詳細（所属ユニット付き）を表す。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyWithUnits {
    #[serde(flatten)]
    pub property: Property,
    pub units: Vec<Unit>,
}
