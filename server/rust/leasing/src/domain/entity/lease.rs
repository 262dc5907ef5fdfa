use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::payment::Payment;

/// Lease はユニットの賃貸契約を表す。当事者は owner_id と tenant_id の 2 者。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lease {
    pub id: i64,
    pub unit_id: i64,
    pub tenant_id: i64,
    /// 契約作成時のトークンの subject
    pub owner_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Lease {
    /// 指定の利用者がこの契約の当事者（所有者または入居者）かを返す。
    pub fn is_party(&self, subject_id: i64) -> bool {
        self.owner_id == subject_id || self.tenant_id == subject_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLease {
    pub unit_id: i64,
    pub tenant_id: i64,
    pub owner_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: f64,
    pub status: String,
}

impl NewLease {
    /// 終了日は開始日以降でなければならない。終了日未定は許可する。
    pub fn has_valid_period(&self) -> bool {
        self.end_date.map_or(true, |end| end >= self.start_date)
    }
}

/// LeaseWithPayments は契約詳細（支払履歴付き）を表す。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaseWithPayments {
    #[serde(flatten)]
    pub lease: Lease,
    pub payments: Vec<Payment>,
}
