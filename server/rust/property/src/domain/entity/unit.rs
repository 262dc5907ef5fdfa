use chrono::{DateTime, Utc};
use serde::Serialize;

/// 新規ユニットの既定ステータス。
pub const DEFAULT_UNIT_STATUS: &str = "AVAILABLE";

/// Unit は物件内の賃貸区画を表す。所有者は親 Property の owner_id で決まる。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    pub id: i64,
    pub property_id: i64,
    pub unit_number: String,
    pub area: Option<f64>,
    pub floor: Option<i32>,
    pub status: String,
    pub monthly_rent: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUnit {
    pub property_id: i64,
    pub unit_number: String,
    pub area: Option<f64>,
    pub floor: Option<i32>,
    pub status: String,
    pub monthly_rent: f64,
}
