use async_trait::async_trait;
use rental_auth::OwnerScope;
use sqlx::PgPool;

use super::map_sqlx_error;
use crate::domain::entity::unit::{NewUnit, Unit};
use crate::domain::repository::{StoreError, UnitRepository};

/// UnitPostgresRepository は PostgreSQL ベースのユニットリポジトリ。
/// 所有者判定は親 property との結合で行う。
pub struct UnitPostgresRepository {
    pool: PgPool,
}

impl UnitPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct UnitRow {
    id: i64,
    property_id: i64,
    unit_number: String,
    area: Option<f64>,
    floor: Option<i32>,
    status: String,
    monthly_rent: f64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UnitRow> for Unit {
    fn from(row: UnitRow) -> Self {
        Unit {
            id: row.id,
            property_id: row.property_id,
            unit_number: row.unit_number,
            area: row.area,
            floor: row.floor,
            status: row.status,
            monthly_rent: row.monthly_rent,
            created_at: row.created_at,
        }
    }
}

/// NUMERIC 列は float8 にキャストして読み出す。
const UNIT_COLUMNS: &str = "u.id, u.property_id, u.unit_number, u.area::float8 AS area, \
     u.floor, u.status, u.monthly_rent::float8 AS monthly_rent, u.created_at";

#[async_trait]
impl UnitRepository for UnitPostgresRepository {
    async fn list(
        &self,
        scope: OwnerScope,
        property_id: Option<i64>,
    ) -> Result<Vec<Unit>, StoreError> {
        let query = format!(
            "SELECT {UNIT_COLUMNS} FROM property_mgmt.unit u \
             JOIN property_mgmt.property p ON p.id = u.property_id \
             WHERE p.owner_id = $1 AND ($2::bigint IS NULL OR u.property_id = $2) \
             ORDER BY u.id"
        );
        let rows = sqlx::query_as::<_, UnitRow>(&query)
            .bind(scope.owner_id())
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, scope: OwnerScope, unit: NewUnit) -> Result<Option<Unit>, StoreError> {
        // 親物件の所有者確認と挿入を 1 文で行う
        let query = format!(
            "WITH u AS ( \
                INSERT INTO property_mgmt.unit (property_id, unit_number, area, floor, status, monthly_rent) \
                SELECT p.id, $3, $4::float8, $5, $6, $7::float8 \
                FROM property_mgmt.property p WHERE p.id = $1 AND p.owner_id = $2 \
                RETURNING * \
             ) SELECT {UNIT_COLUMNS} FROM u"
        );
        let row = sqlx::query_as::<_, UnitRow>(&query)
            .bind(unit.property_id)
            .bind(scope.owner_id())
            .bind(&unit.unit_number)
            .bind(unit.area)
            .bind(unit.floor)
            .bind(&unit.status)
            .bind(unit.monthly_rent)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Into::into))
    }

    async fn find(&self, scope: OwnerScope, id: i64) -> Result<Option<Unit>, StoreError> {
        let query = format!(
            "SELECT {UNIT_COLUMNS} FROM property_mgmt.unit u \
             JOIN property_mgmt.property p ON p.id = u.property_id \
             WHERE u.id = $1 AND p.owner_id = $2"
        );
        let row = sqlx::query_as::<_, UnitRow>(&query)
            .bind(id)
            .bind(scope.owner_id())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Into::into))
    }

    async fn update_status(
        &self,
        scope: OwnerScope,
        id: i64,
        status: &str,
    ) -> Result<Option<Unit>, StoreError> {
        let query = format!(
            "WITH u AS ( \
                UPDATE property_mgmt.unit SET status = $3 \
                WHERE id = $1 AND property_id IN \
                    (SELECT id FROM property_mgmt.property WHERE owner_id = $2) \
                RETURNING * \
             ) SELECT {UNIT_COLUMNS} FROM u"
        );
        let row = sqlx::query_as::<_, UnitRow>(&query)
            .bind(id)
            .bind(scope.owner_id())
            .bind(status)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Into::into))
    }
}
