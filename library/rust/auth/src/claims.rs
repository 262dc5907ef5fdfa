//! トークン Claims 構造体と、検証済みの呼び出し元を表す IdentityContext。

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Claims はトークンに格納する固定形の Claim 集合。
///
/// `sub` と `role` が欠けたトークンはデシリアライズの時点で拒否される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity の ID（整数の文字列表現）
    pub sub: String,

    /// 発行時点のロール
    pub role: Role,

    /// 発行時刻（Unix タイムスタンプ秒）
    #[serde(default)]
    pub iat: i64,

    /// 有効期限（Unix タイムスタンプ秒）
    pub exp: i64,
}

impl Claims {
    pub fn new(subject_id: i64, role: Role, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject_id.to_string(),
            role,
            iat: issued_at,
            exp: expires_at,
        }
    }

    /// `sub` を整数の Identity ID として返す。整数でない場合は None。
    pub fn subject_id(&self) -> Option<i64> {
        self.sub.trim().parse().ok()
    }
}

impl std::fmt::Display for Claims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Claims{{sub={}, role={}, iat={}, exp={}}}",
            self.sub, self.role, self.iat, self.exp
        )
    }
}

/// IdentityContext は検証済みトークンから取り出した呼び出し元。
/// Identity Store を再参照しないため、role は発行時点の値である。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdentityContext {
    pub id: i64,
    pub role: Role,
}

impl IdentityContext {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}
