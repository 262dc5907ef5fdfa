use std::sync::Arc;

use chrono::NaiveDate;
use rental_auth::IdentityContext;

use super::{normalize_status, LeasingError};
use crate::domain::entity::lease::{Lease, NewLease};
use crate::domain::repository::LeaseRepository;

/// CreateLeaseInput は契約作成の入力。所有者は呼び出し元で決まる。
#[derive(Debug, Clone)]
pub struct CreateLeaseInput {
    pub unit_id: i64,
    pub tenant_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: f64,
    pub status: String,
}

/// CreateLeaseUseCase は呼び出し元を所有者として契約を作成する。
pub struct CreateLeaseUseCase {
    lease_repo: Arc<dyn LeaseRepository>,
}

impl CreateLeaseUseCase {
    pub fn new(lease_repo: Arc<dyn LeaseRepository>) -> Self {
        Self { lease_repo }
    }

    pub async fn execute(
        &self,
        ctx: &IdentityContext,
        input: CreateLeaseInput,
    ) -> Result<Lease, LeasingError> {
        let new_lease = NewLease {
            unit_id: input.unit_id,
            tenant_id: input.tenant_id,
            owner_id: ctx.id,
            start_date: input.start_date,
            end_date: input.end_date,
            monthly_rent: input.monthly_rent,
            status: normalize_status(&input.status)?,
        };
        if !new_lease.has_valid_period() {
            return Err(LeasingError::InvalidPeriod);
        }

        let lease = self.lease_repo.create(new_lease).await?;

        tracing::info!(
            lease_id = lease.id,
            owner_id = lease.owner_id,
            tenant_id = lease.tenant_id,
            "lease created"
        );
        Ok(lease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::lease_repository::MockLeaseRepository;
    use rental_auth::Role;

    fn input(start: NaiveDate, end: Option<NaiveDate>) -> CreateLeaseInput {
        CreateLeaseInput {
            unit_id: 4,
            tenant_id: 20,
            start_date: start,
            end_date: end,
            monthly_rent: 1500.0,
            status: "active".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_owner_taken_from_context() {
        let mut mock = MockLeaseRepository::new();
        mock.expect_create()
            .withf(|l| l.owner_id == 10 && l.tenant_id == 20 && l.status == "ACTIVE")
            .returning(|l| {
                Ok(Lease {
                    id: 1,
                    unit_id: l.unit_id,
                    tenant_id: l.tenant_id,
                    owner_id: l.owner_id,
                    start_date: l.start_date,
                    end_date: l.end_date,
                    monthly_rent: l.monthly_rent,
                    status: l.status,
                    created_at: chrono::Utc::now(),
                })
            });

        let uc = CreateLeaseUseCase::new(Arc::new(mock));
        let lease = uc
            .execute(
                &IdentityContext::new(10, Role::Owner),
                input(date(2026, 1, 1), Some(date(2026, 12, 31))),
            )
            .await
            .unwrap();
        assert_eq!(lease.owner_id, 10);
    }

    #[tokio::test]
    async fn test_end_before_start_rejected() {
        let mut mock = MockLeaseRepository::new();
        mock.expect_create().never();

        let uc = CreateLeaseUseCase::new(Arc::new(mock));
        let result = uc
            .execute(
                &IdentityContext::new(10, Role::Owner),
                input(date(2026, 6, 1), Some(date(2026, 5, 31))),
            )
            .await;
        assert!(matches!(result, Err(LeasingError::InvalidPeriod)));
    }
}
