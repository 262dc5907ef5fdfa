use async_trait::async_trait;
use rental_auth::OwnerScope;
use sqlx::PgPool;

use super::map_sqlx_error;
use crate::domain::entity::property::{NewProperty, Property};
use crate::domain::repository::{PropertyRepository, StoreError};

/// PropertyPostgresRepository は PostgreSQL ベースの物件リポジトリ。
/// property_mgmt.property テーブルに対する操作はすべて owner_id で絞り込む。
pub struct PropertyPostgresRepository {
    pool: PgPool,
}

impl PropertyPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct PropertyRow {
    id: i64,
    owner_id: i64,
    name: String,
    address: String,
    description: Option<String>,
    property_type: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            address: row.address,
            description: row.description,
            property_type: row.property_type,
            created_at: row.created_at,
        }
    }
}

const PROPERTY_COLUMNS: &str =
    "id, owner_id, name, address, description, property_type, created_at";

#[async_trait]
impl PropertyRepository for PropertyPostgresRepository {
    async fn list(&self, scope: OwnerScope) -> Result<Vec<Property>, StoreError> {
        let query = format!(
            "SELECT {PROPERTY_COLUMNS} FROM property_mgmt.property WHERE owner_id = $1 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, PropertyRow>(&query)
            .bind(scope.owner_id())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, property: NewProperty) -> Result<Property, StoreError> {
        let query = format!(
            "INSERT INTO property_mgmt.property (owner_id, name, address, description, property_type) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PROPERTY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PropertyRow>(&query)
            .bind(property.owner_id)
            .bind(&property.name)
            .bind(&property.address)
            .bind(&property.description)
            .bind(&property.property_type)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn find(&self, scope: OwnerScope, id: i64) -> Result<Option<Property>, StoreError> {
        let query = format!(
            "SELECT {PROPERTY_COLUMNS} FROM property_mgmt.property WHERE id = $1 AND owner_id = $2"
        );
        let row = sqlx::query_as::<_, PropertyRow>(&query)
            .bind(id)
            .bind(scope.owner_id())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, scope: OwnerScope, id: i64) -> Result<bool, StoreError> {
        // unit は外部キーの ON DELETE CASCADE で削除される
        let result =
            sqlx::query("DELETE FROM property_mgmt.property WHERE id = $1 AND owner_id = $2")
                .bind(id)
                .bind(scope.owner_id())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }
}
