use std::sync::Arc;

use rental_auth::IdentityContext;

use super::LeasingError;
use crate::domain::entity::payment::Payment;
use crate::domain::repository::{PartyScope, PaymentRepository};

/// ListPaymentsUseCase は呼び出し元が当事者である契約の支払一覧を返す。
pub struct ListPaymentsUseCase {
    payment_repo: Arc<dyn PaymentRepository>,
}

impl ListPaymentsUseCase {
    pub fn new(payment_repo: Arc<dyn PaymentRepository>) -> Self {
        Self { payment_repo }
    }

    pub async fn execute(
        &self,
        ctx: &IdentityContext,
        lease_id: Option<i64>,
    ) -> Result<Vec<Payment>, LeasingError> {
        Ok(self
            .payment_repo
            .list(PartyScope::of(ctx), lease_id)
            .await?)
    }
}
