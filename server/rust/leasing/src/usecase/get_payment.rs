use std::sync::Arc;

use rental_auth::IdentityContext;

use super::LeasingError;
use crate::domain::entity::payment::Payment;
use crate::domain::repository::{PartyScope, PaymentRepository};

pub struct GetPaymentUseCase {
    payment_repo: Arc<dyn PaymentRepository>,
}

impl GetPaymentUseCase {
    pub fn new(payment_repo: Arc<dyn PaymentRepository>) -> Self {
        Self { payment_repo }
    }

    pub async fn execute(&self, ctx: &IdentityContext, id: i64) -> Result<Payment, LeasingError> {
        self.payment_repo
            .find(PartyScope::of(ctx), id)
            .await?
            .ok_or(LeasingError::PaymentNotFound(id))
    }
}
