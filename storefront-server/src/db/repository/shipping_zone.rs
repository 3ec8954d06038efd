//! Shipping Zone Repository

use super::{RepoError, RepoResult};
use crate::db::Database;
use crate::eligibility::ZoneRegistry;
use storefront_shared::models::{ShippingZone, ShippingZoneUpsert, UsState, ZoneStatus, find_state};
use storefront_shared::util::{now_millis, snowflake_id};

#[derive(Clone)]
pub struct ShippingZoneRepository {
    db: Database,
}

impl ShippingZoneRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stored overrides, ordered by state code
    pub fn find_all(&self) -> Vec<ShippingZone> {
        let mut zones: Vec<ShippingZone> =
            self.db.zones.iter().map(|e| e.value().clone()).collect();
        zones.sort_by(|a, b| a.state_code.cmp(&b.state_code));
        zones
    }

    /// Stored override for a state, if any
    pub fn find_by_state(&self, state_code: &str) -> RepoResult<Option<ShippingZone>> {
        let state = resolve_state(state_code)?;
        Ok(self.db.zones.get(state.code).map(|z| z.value().clone()))
    }

    /// Registry over the current overrides
    pub fn registry(&self) -> ZoneRegistry {
        ZoneRegistry::new(self.find_all())
    }

    /// Create or replace the override for a state
    ///
    /// Conditions are dropped unless the status is conditional.
    pub async fn upsert(&self, state_code: &str, data: ShippingZoneUpsert) -> RepoResult<ShippingZone> {
        let state = resolve_state(state_code)?;
        let now = now_millis();

        let conditions = match data.status {
            ZoneStatus::Conditional => data.conditions.filter(|c| !c.is_empty()),
            _ => None,
        };

        let writes = self.db.lock_writes().await;
        let existing = self.db.zones.get(state.code).map(|z| z.value().clone());
        let (id, created_at) = existing
            .as_ref()
            .map(|z| (z.id.unwrap_or_else(snowflake_id), z.created_at))
            .unwrap_or_else(|| (snowflake_id(), now));

        let zone = ShippingZone {
            id: Some(id),
            state_code: state.code.to_string(),
            state_name: state.name.to_string(),
            status: data.status,
            conditions,
            customer_message: non_blank(data.customer_message),
            internal_notes: non_blank(data.internal_notes),
            created_at,
            updated_at: now,
        };
        self.db.zones.insert(state.code.to_string(), zone.clone());

        if let Err(e) = self.db.persist(&writes).await {
            match existing {
                Some(previous) => {
                    self.db.zones.insert(state.code.to_string(), previous);
                }
                None => {
                    self.db.zones.remove(state.code);
                }
            }
            return Err(e);
        }
        Ok(zone)
    }

    /// Remove the override for a state, restoring the default allowed zone
    pub async fn delete(&self, state_code: &str) -> RepoResult<()> {
        let state = resolve_state(state_code)?;
        let writes = self.db.lock_writes().await;
        let Some((code, removed)) = self.db.zones.remove(state.code) else {
            return Err(RepoError::ZoneNotFound(state.code.to_string()));
        };
        if let Err(e) = self.db.persist(&writes).await {
            self.db.zones.insert(code, removed);
            return Err(e);
        }
        Ok(())
    }
}

fn resolve_state(state_code: &str) -> RepoResult<&'static UsState> {
    find_state(state_code).ok_or_else(|| RepoError::InvalidStateCode(state_code.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
