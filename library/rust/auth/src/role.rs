//! ロール定義。トークンの `role` Claim と Identity Store の role 列で共通に使う。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role はプラットフォーム上のユーザーロールを表す。
/// シリアライズ形式は大文字の文字列（"OWNER" など）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Owner,
    Tenant,
    Admin,
}

impl Role {
    /// 全ロールの一覧。
    pub const ALL: [Role; 4] = [Role::User, Role::Owner, Role::Tenant, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Owner => "OWNER",
            Role::Tenant => "TENANT",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知のロール文字列を受け取った場合のエラー。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    /// 大文字小文字を区別せずにパースする。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRoleError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::User.as_str(), "USER");
        assert_eq!(Role::Owner.as_str(), "OWNER");
        assert_eq!(Role::Tenant.as_str(), "TENANT");
        assert_eq!(Role::Admin.as_str(), "ADMIN");
    }

    #[test]
    fn test_role_from_str_case_insensitive() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("Tenant".parse::<Role>().unwrap(), Role::Tenant);
        assert_eq!(" ADMIN ".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_role_from_str_unknown() {
        let err = "SUPERUSER".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRoleError("SUPERUSER".to_string()));
    }

    #[test]
    fn test_role_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"OWNER\"");
        let role: Role = serde_json::from_str("\"TENANT\"").unwrap();
        assert_eq!(role, Role::Tenant);
        assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
    }

    #[test]
    fn test_role_default_is_user() {
        assert_eq!(Role::default(), Role::User);
    }
}
