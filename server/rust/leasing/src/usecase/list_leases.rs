use std::sync::Arc;

use rental_auth::IdentityContext;

use super::LeasingError;
use crate::domain::entity::lease::Lease;
use crate::domain::repository::{LeaseRepository, PartyScope};

/// ListLeasesUseCase は呼び出し元が当事者である契約一覧を返す。
pub struct ListLeasesUseCase {
    lease_repo: Arc<dyn LeaseRepository>,
}

impl ListLeasesUseCase {
    pub fn new(lease_repo: Arc<dyn LeaseRepository>) -> Self {
        Self { lease_repo }
    }

    pub async fn execute(&self, ctx: &IdentityContext) -> Result<Vec<Lease>, LeasingError> {
        Ok(self.lease_repo.list(PartyScope::of(ctx)).await?)
    }
}
