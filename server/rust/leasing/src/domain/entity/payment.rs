use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Payment は契約に対する支払記録を表す。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub id: i64,
    pub lease_id: i64,
    pub payment_date: NaiveDate,
    pub amount: f64,
    /// PAID, PENDING など
    pub status: String,
    pub method: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub lease_id: i64,
    pub payment_date: NaiveDate,
    pub amount: f64,
    pub status: String,
    pub method: Option<String>,
}
