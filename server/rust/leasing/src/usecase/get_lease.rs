use std::sync::Arc;

use rental_auth::IdentityContext;

use super::LeasingError;
use crate::domain::entity::lease::LeaseWithPayments;
use crate::domain::repository::{LeaseRepository, PartyScope, PaymentRepository};

/// GetLeaseUseCase は契約詳細を支払履歴付きで返す。
pub struct GetLeaseUseCase {
    lease_repo: Arc<dyn LeaseRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
}

impl GetLeaseUseCase {
    pub fn new(
        lease_repo: Arc<dyn LeaseRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            lease_repo,
            payment_repo,
        }
    }

    pub async fn execute(
        &self,
        ctx: &IdentityContext,
        id: i64,
    ) -> Result<LeaseWithPayments, LeasingError> {
        let scope = PartyScope::of(ctx);
        let lease = self
            .lease_repo
            .find(scope, id)
            .await?
            .ok_or(LeasingError::LeaseNotFound(id))?;
        let payments = self.payment_repo.list(scope, Some(lease.id)).await?;

        Ok(LeaseWithPayments { lease, payments })
    }
}
