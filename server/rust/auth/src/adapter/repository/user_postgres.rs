use async_trait::async_trait;
use rental_auth::Role;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User, UserUpdate};
use crate::domain::repository::{UserRepository, UserStoreError};

/// UserPostgresRepository は PostgreSQL ベースの Identity Store。
/// auth.app_user テーブルを使用し、email の一意制約で重複登録を防ぐ。
pub struct UserPostgresRepository {
    pool: PgPool,
}

impl UserPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// UserRow は auth.app_user テーブルの行を表す中間構造体。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| UserStoreError::Internal(format!("user {}: {}", row.id, e)))?;
        Ok(User {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            password_hash: row.password_hash,
            role,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

/// sqlx のエラーを UserStoreError に変換する。
fn map_sqlx_error(err: sqlx::Error, email: Option<&str>) -> UserStoreError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            UserStoreError::DuplicateEmail(email.unwrap_or_default().to_string())
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => UserStoreError::Unavailable(err.to_string()),
        other => UserStoreError::Internal(other.to_string()),
    }
}

const USER_COLUMNS: &str = "id, email, full_name, password_hash, role, is_active, created_at";

#[async_trait]
impl UserRepository for UserPostgresRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM auth.app_user WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, None))?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM auth.app_user WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, None))?;
        row.map(User::try_from).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let query = format!(
            "INSERT INTO auth.app_user (email, full_name, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, Some(&user.email)))?;
        User::try_from(row)
    }

    async fn update(&self, id: i64, update: UserUpdate) -> Result<Option<User>, UserStoreError> {
        let query = format!(
            "UPDATE auth.app_user \
             SET role = COALESCE($2, role), is_active = COALESCE($3, is_active) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .bind(update.role.map(|r| r.as_str()))
            .bind(update.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, None))?;
        row.map(User::try_from).transpose()
    }
}
