use std::collections::BTreeMap;

use async_trait::async_trait;
use rental_auth::OwnerScope;
use tokio::sync::RwLock;

use crate::domain::entity::property::{NewProperty, Property};
use crate::domain::entity::unit::{NewUnit, Unit};
use crate::domain::repository::{PropertyRepository, StoreError, UnitRepository};

#[derive(Default)]
struct Tables {
    next_property_id: i64,
    next_unit_id: i64,
    properties: BTreeMap<i64, Property>,
    units: BTreeMap<i64, Unit>,
}

impl Tables {
    fn owns_property(&self, scope: OwnerScope, property_id: i64) -> bool {
        self.properties
            .get(&property_id)
            .is_some_and(|p| scope.includes(p.owner_id))
    }
}

/// InMemoryPropertyStore は物件・ユニットを 1 つのロックで保持するインメモリストア。
/// 物件削除時のユニット連鎖削除を同一ロック内で行うため、両トレイトを実装する。
pub struct InMemoryPropertyStore {
    tables: RwLock<Tables>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryPropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyStore {
    async fn list(&self, scope: OwnerScope) -> Result<Vec<Property>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .properties
            .values()
            .filter(|p| scope.includes(p.owner_id))
            .cloned()
            .collect())
    }

    async fn create(&self, property: NewProperty) -> Result<Property, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_property_id += 1;
        let created = Property {
            id: tables.next_property_id,
            owner_id: property.owner_id,
            name: property.name,
            address: property.address,
            description: property.description,
            property_type: property.property_type,
            created_at: chrono::Utc::now(),
        };
        tables.properties.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find(&self, scope: OwnerScope, id: i64) -> Result<Option<Property>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .properties
            .get(&id)
            .filter(|p| scope.includes(p.owner_id))
            .cloned())
    }

    async fn delete(&self, scope: OwnerScope, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_property(scope, id) {
            return Ok(false);
        }
        tables.properties.remove(&id);
        tables.units.retain(|_, u| u.property_id != id);
        Ok(true)
    }
}

#[async_trait]
impl UnitRepository for InMemoryPropertyStore {
    async fn list(
        &self,
        scope: OwnerScope,
        property_id: Option<i64>,
    ) -> Result<Vec<Unit>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .units
            .values()
            .filter(|u| property_id.map_or(true, |pid| u.property_id == pid))
            .filter(|u| tables.owns_property(scope, u.property_id))
            .cloned()
            .collect())
    }

    async fn create(&self, scope: OwnerScope, unit: NewUnit) -> Result<Option<Unit>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_property(scope, unit.property_id) {
            return Ok(None);
        }
        tables.next_unit_id += 1;
        let created = Unit {
            id: tables.next_unit_id,
            property_id: unit.property_id,
            unit_number: unit.unit_number,
            area: unit.area,
            floor: unit.floor,
            status: unit.status,
            monthly_rent: unit.monthly_rent,
            created_at: chrono::Utc::now(),
        };
        tables.units.insert(created.id, created.clone());
        Ok(Some(created))
    }

    async fn find(&self, scope: OwnerScope, id: i64) -> Result<Option<Unit>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .units
            .get(&id)
            .filter(|u| tables.owns_property(scope, u.property_id))
            .cloned())
    }

    async fn update_status(
        &self,
        scope: OwnerScope,
        id: i64,
        status: &str,
    ) -> Result<Option<Unit>, StoreError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .units
            .get(&id)
            .is_some_and(|u| tables.owns_property(scope, u.property_id));
        if !owned {
            return Ok(None);
        }
        Ok(tables.units.get_mut(&id).map(|unit| {
            unit.status = status.to_string();
            unit.clone()
        }))
    }
}
