use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::map_sqlx_error;
use crate::domain::entity::lease::{Lease, NewLease};
use crate::domain::repository::{LeaseRepository, PartyScope, StoreError};

/// LeasePostgresRepository は PostgreSQL ベースの契約リポジトリ。
pub struct LeasePostgresRepository {
    pool: PgPool,
}

impl LeasePostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct LeaseRow {
    id: i64,
    unit_id: i64,
    tenant_id: i64,
    owner_id: i64,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    monthly_rent: f64,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<LeaseRow> for Lease {
    fn from(row: LeaseRow) -> Self {
        Lease {
            id: row.id,
            unit_id: row.unit_id,
            tenant_id: row.tenant_id,
            owner_id: row.owner_id,
            start_date: row.start_date,
            end_date: row.end_date,
            monthly_rent: row.monthly_rent,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

const LEASE_COLUMNS: &str = "id, unit_id, tenant_id, owner_id, start_date, end_date, \
     monthly_rent::float8 AS monthly_rent, status, created_at";

#[async_trait]
impl LeaseRepository for LeasePostgresRepository {
    async fn list(&self, scope: PartyScope) -> Result<Vec<Lease>, StoreError> {
        let query = format!(
            "SELECT {LEASE_COLUMNS} FROM leasing.lease \
             WHERE owner_id = $1 OR tenant_id = $1 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, LeaseRow>(&query)
            .bind(scope.subject_id())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, lease: NewLease) -> Result<Lease, StoreError> {
        let query = format!(
            "INSERT INTO leasing.lease \
             (unit_id, tenant_id, owner_id, start_date, end_date, monthly_rent, status) \
             VALUES ($1, $2, $3, $4, $5, $6::float8, $7) \
             RETURNING {LEASE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, LeaseRow>(&query)
            .bind(lease.unit_id)
            .bind(lease.tenant_id)
            .bind(lease.owner_id)
            .bind(lease.start_date)
            .bind(lease.end_date)
            .bind(lease.monthly_rent)
            .bind(&lease.status)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn find(&self, scope: PartyScope, id: i64) -> Result<Option<Lease>, StoreError> {
        let query = format!(
            "SELECT {LEASE_COLUMNS} FROM leasing.lease \
             WHERE id = $1 AND (owner_id = $2 OR tenant_id = $2)"
        );
        let row = sqlx::query_as::<_, LeaseRow>(&query)
            .bind(id)
            .bind(scope.subject_id())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Into::into))
    }
}
