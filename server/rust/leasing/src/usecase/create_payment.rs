use std::sync::Arc;

use chrono::NaiveDate;
use rental_auth::IdentityContext;

use super::{normalize_status, LeasingError};
use crate::domain::entity::payment::{NewPayment, Payment};
use crate::domain::repository::{PartyScope, PaymentRepository};

#[derive(Debug, Clone)]
pub struct CreatePaymentInput {
    pub lease_id: i64,
    pub payment_date: NaiveDate,
    pub amount: f64,
    pub status: String,
    pub method: Option<String>,
}

/// CreatePaymentUseCase は支払を記録する。呼び出し元は契約の当事者でなければならない。
pub struct CreatePaymentUseCase {
    payment_repo: Arc<dyn PaymentRepository>,
}

impl CreatePaymentUseCase {
    pub fn new(payment_repo: Arc<dyn PaymentRepository>) -> Self {
        Self { payment_repo }
    }

    pub async fn execute(
        &self,
        ctx: &IdentityContext,
        input: CreatePaymentInput,
    ) -> Result<Payment, LeasingError> {
        let status = normalize_status(&input.status)?;
        let method = input
            .method
            .map(|m| m.trim().to_uppercase())
            .filter(|m| !m.is_empty());

        let payment = self
            .payment_repo
            .create(
                PartyScope::of(ctx),
                NewPayment {
                    lease_id: input.lease_id,
                    payment_date: input.payment_date,
                    amount: input.amount,
                    status,
                    method,
                },
            )
            .await?
            .ok_or(LeasingError::LeaseNotFound(input.lease_id))?;

        tracing::info!(
            payment_id = payment.id,
            lease_id = payment.lease_id,
            recorded_by = ctx.id,
            "payment recorded"
        );
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::payment_repository::MockPaymentRepository;
    use rental_auth::Role;

    fn input() -> CreatePaymentInput {
        CreatePaymentInput {
            lease_id: 7,
            payment_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            amount: 1500.0,
            status: "paid".to_string(),
            method: Some(" bank_transfer ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_party_records_payment() {
        let mut mock = MockPaymentRepository::new();
        mock.expect_create()
            .withf(|scope, p| {
                scope.subject_id() == 20
                    && p.status == "PAID"
                    && p.method.as_deref() == Some("BANK_TRANSFER")
            })
            .returning(|_, p| {
                Ok(Some(Payment {
                    id: 1,
                    lease_id: p.lease_id,
                    payment_date: p.payment_date,
                    amount: p.amount,
                    status: p.status,
                    method: p.method,
                    created_at: chrono::Utc::now(),
                }))
            });

        let uc = CreatePaymentUseCase::new(Arc::new(mock));
        let payment = uc
            .execute(&IdentityContext::new(20, Role::Tenant), input())
            .await
            .unwrap();
        assert_eq!(payment.lease_id, 7);
    }

    #[tokio::test]
    async fn test_non_party_gets_lease_not_found() {
        let mut mock = MockPaymentRepository::new();
        mock.expect_create().returning(|_, _| Ok(None));

        let uc = CreatePaymentUseCase::new(Arc::new(mock));
        let result = uc
            .execute(&IdentityContext::new(99, Role::Tenant), input())
            .await;
        assert!(matches!(result, Err(LeasingError::LeaseNotFound(7))));
    }

    #[tokio::test]
    async fn test_empty_status_rejected() {
        let mut mock = MockPaymentRepository::new();
        mock.expect_create().never();

        let uc = CreatePaymentUseCase::new(Arc::new(mock));
        let mut bad = input();
        bad.status = " ".to_string();
        let result = uc
            .execute(&IdentityContext::new(20, Role::Tenant), bad)
            .await;
        assert!(matches!(result, Err(LeasingError::Validation(_))));
    }
}
