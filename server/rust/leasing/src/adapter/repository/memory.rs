use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entity::lease::{Lease, NewLease};
use crate::domain::entity::payment::{NewPayment, Payment};
use crate::domain::repository::{LeaseRepository, PartyScope, PaymentRepository, StoreError};

#[derive(Default)]
struct Tables {
    next_lease_id: i64,
    next_payment_id: i64,
    leases: BTreeMap<i64, Lease>,
    payments: BTreeMap<i64, Payment>,
}

impl Tables {
    fn is_party(&self, scope: PartyScope, lease_id: i64) -> bool {
        self.leases
            .get(&lease_id)
            .is_some_and(|l| l.is_party(scope.subject_id()))
    }
}

/// InMemoryLeasingStore は契約・支払を 1 つのロックで保持するインメモリストア。
/// 支払作成時の当事者確認と挿入を同一ロック内で行う。
pub struct InMemoryLeasingStore {
    tables: RwLock<Tables>,
}

impl InMemoryLeasingStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryLeasingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeaseRepository for InMemoryLeasingStore {
    async fn list(&self, scope: PartyScope) -> Result<Vec<Lease>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .leases
            .values()
            .filter(|l| l.is_party(scope.subject_id()))
            .cloned()
            .collect())
    }

    async fn create(&self, lease: NewLease) -> Result<Lease, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_lease_id += 1;
        let created = Lease {
            id: tables.next_lease_id,
            unit_id: lease.unit_id,
            tenant_id: lease.tenant_id,
            owner_id: lease.owner_id,
            start_date: lease.start_date,
            end_date: lease.end_date,
            monthly_rent: lease.monthly_rent,
            status: lease.status,
            created_at: chrono::Utc::now(),
        };
        tables.leases.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find(&self, scope: PartyScope, id: i64) -> Result<Option<Lease>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .leases
            .get(&id)
            .filter(|l| l.is_party(scope.subject_id()))
            .cloned())
    }
}

#[async_trait]
impl PaymentRepository for InMemoryLeasingStore {
    async fn list(
        &self,
        scope: PartyScope,
        lease_id: Option<i64>,
    ) -> Result<Vec<Payment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .payments
            .values()
            .filter(|p| lease_id.map_or(true, |lid| p.lease_id == lid))
            .filter(|p| tables.is_party(scope, p.lease_id))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        scope: PartyScope,
        payment: NewPayment,
    ) -> Result<Option<Payment>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.is_party(scope, payment.lease_id) {
            return Ok(None);
        }
        tables.next_payment_id += 1;
        let created = Payment {
            id: tables.next_payment_id,
            lease_id: payment.lease_id,
            payment_date: payment.payment_date,
            amount: payment.amount,
            status: payment.status,
            method: payment.method,
            created_at: chrono::Utc::now(),
        };
        tables.payments.insert(created.id, created.clone());
        Ok(Some(created))
    }

    async fn find(&self, scope: PartyScope, id: i64) -> Result<Option<Payment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .payments
            .get(&id)
            .filter(|p| tables.is_party(scope, p.lease_id))
            .cloned())
    }
}
