//! 認可ガード: ロール判定と所有者判定。
//!
//! 所有者判定は [`OwnerScope`] としてリポジトリのクエリ条件に渡すことを基本とする。
//! 取得後に [`authorize`] で判定するのは、クエリで絞り込めない場合に限る。

use crate::claims::IdentityContext;
use crate::role::Role;
use crate::verifier::AuthError;

/// Requirement は操作に必要な条件を表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// いずれかのロールを持つこと（完全一致）
    AnyRole(&'static [Role]),
    /// リソースの所有者 ID が呼び出し元と一致すること
    Owner(i64),
}

/// IdentityContext が指定ロールであるかを判定する。
pub fn has_role(ctx: &IdentityContext, role: Role) -> bool {
    ctx.role == role
}

/// IdentityContext が指定ロールのいずれかであるかを判定する。
pub fn has_any_role(ctx: &IdentityContext, roles: &[Role]) -> bool {
    roles.contains(&ctx.role)
}

/// 呼び出し元がリソースの所有者であるかを判定する。
pub fn is_owner(ctx: &IdentityContext, owner_id: i64) -> bool {
    ctx.id == owner_id
}

/// Requirement を評価し、満たさない場合は PermissionDenied を返す。
pub fn authorize(ctx: &IdentityContext, requirement: &Requirement) -> Result<(), AuthError> {
    let allowed = match requirement {
        Requirement::AnyRole(roles) => has_any_role(ctx, roles),
        Requirement::Owner(owner_id) => is_owner(ctx, *owner_id),
    };

    if allowed {
        Ok(())
    } else {
        tracing::debug!(
            subject_id = ctx.id,
            role = %ctx.role,
            ?requirement,
            "authorization denied"
        );
        Err(AuthError::PermissionDenied)
    }
}

/// OwnerScope はリポジトリ問い合わせに渡す所有者条件。
/// 他者のリソースは「存在しない」として扱われ、存在の有無も漏れない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerScope {
    owner_id: i64,
}

impl OwnerScope {
    pub fn of(ctx: &IdentityContext) -> Self {
        Self { owner_id: ctx.id }
    }

    pub fn owner_id(self) -> i64 {
        self.owner_id
    }

    /// 指定の所有者 ID がこのスコープに含まれるかを返す。
    pub fn includes(self, owner_id: i64) -> bool {
        self.owner_id == owner_id
    }
}
