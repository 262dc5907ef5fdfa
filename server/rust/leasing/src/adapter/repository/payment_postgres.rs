use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::map_sqlx_error;
use crate::domain::entity::payment::{NewPayment, Payment};
use crate::domain::repository::{PartyScope, PaymentRepository, StoreError};

/// PaymentPostgresRepository は PostgreSQL ベースの支払リポジトリ。
/// 当事者判定は親 lease との結合で行う。
pub struct PaymentPostgresRepository {
    pool: PgPool,
}

impl PaymentPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    lease_id: i64,
    payment_date: NaiveDate,
    amount: f64,
    status: String,
    method: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            lease_id: row.lease_id,
            payment_date: row.payment_date,
            amount: row.amount,
            status: row.status,
            method: row.method,
            created_at: row.created_at,
        }
    }
}

const PAYMENT_COLUMNS: &str = "py.id, py.lease_id, py.payment_date, \
     py.amount::float8 AS amount, py.status, py.method, py.created_at";

#[async_trait]
impl PaymentRepository for PaymentPostgresRepository {
    async fn list(
        &self,
        scope: PartyScope,
        lease_id: Option<i64>,
    ) -> Result<Vec<Payment>, StoreError> {
        let query = format!(
            "SELECT {PAYMENT_COLUMNS} FROM leasing.payment py \
             JOIN leasing.lease l ON l.id = py.lease_id \
             WHERE (l.owner_id = $1 OR l.tenant_id = $1) \
             AND ($2::bigint IS NULL OR py.lease_id = $2) \
             ORDER BY py.id"
        );
        let rows = sqlx::query_as::<_, PaymentRow>(&query)
            .bind(scope.subject_id())
            .bind(lease_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(
        &self,
        scope: PartyScope,
        payment: NewPayment,
    ) -> Result<Option<Payment>, StoreError> {
        // 親契約の当事者確認と挿入を 1 文で行う
        let query = format!(
            "WITH py AS ( \
                INSERT INTO leasing.payment (lease_id, payment_date, amount, status, method) \
                SELECT l.id, $3, $4::float8, $5, $6 \
                FROM leasing.lease l \
                WHERE l.id = $1 AND (l.owner_id = $2 OR l.tenant_id = $2) \
                RETURNING * \
             ) SELECT {PAYMENT_COLUMNS} FROM py"
        );
        let row = sqlx::query_as::<_, PaymentRow>(&query)
            .bind(payment.lease_id)
            .bind(scope.subject_id())
            .bind(payment.payment_date)
            .bind(payment.amount)
            .bind(&payment.status)
            .bind(&payment.method)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Into::into))
    }

    async fn find(&self, scope: PartyScope, id: i64) -> Result<Option<Payment>, StoreError> {
        let query = format!(
            "SELECT {PAYMENT_COLUMNS} FROM leasing.payment py \
             JOIN leasing.lease l ON l.id = py.lease_id \
             WHERE py.id = $1 AND (l.owner_id = $2 OR l.tenant_id = $2)"
        );
        let row = sqlx::query_as::<_, PaymentRow>(&query)
            .bind(id)
            .bind(scope.subject_id())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Into::into))
    }
}
