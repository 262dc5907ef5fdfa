use chrono::{DateTime, Utc};
use rental_auth::Role;

/// User は Identity Store に保存される利用者を表す。
/// password_hash は Argon2id の PHC 文字列で、外部に返さない。
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    /// 小文字に正規化済み
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// NewUser は登録時に Identity Store へ渡す入力。
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub role: Role,
}

/// UserUpdate は管理者による変更内容。None のフィールドは変更しない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.is_active.is_none()
    }

    /// 変更内容を User に適用する。
    pub fn apply(&self, user: &mut User) {
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

/// normalize_email はメールアドレスを比較・保存用に正規化する。
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
