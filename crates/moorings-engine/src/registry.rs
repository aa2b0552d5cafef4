//! Berth registry: the authoritative set of berth records.
//!
//! Status writes are crate-internal: only the assignment engine may
//! call `set_status`, so presentation code cannot bypass the
//! invariants that bind status to the placement ledger.

use moorings_model::{Berth, BerthStatus};
use std::collections::{BTreeMap, BTreeSet};

/// Errors raised while building or administering the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("berth not found: {0}")]
    BerthNotFound(String),

    #[error("berth id already exists: {0}")]
    DuplicateId(String),

    #[error("berth code already exists: {0}")]
    DuplicateCode(String),

    #[error("berth {0} has an active placement and cannot be decommissioned")]
    ActivePlacement(String),
}

/// Authoritative berth state, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct BerthRegistry {
    berths: BTreeMap<String, Berth>,
}

impl BerthRegistry {
    /// Build a registry from fully-materialized berths.
    ///
    /// Duplicate ids and duplicate codes are rejected; code uniqueness
    /// is a marina-wide contract.
    pub fn from_berths(berths: Vec<Berth>) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for berth in berths {
            registry.create(berth)?;
        }
        Ok(registry)
    }

    /// Admin: register a new berth.
    pub fn create(&mut self, berth: Berth) -> Result<(), RegistryError> {
        if self.berths.contains_key(&berth.id) {
            return Err(RegistryError::DuplicateId(berth.id));
        }
        if self.berths.values().any(|b| b.code == berth.code) {
            return Err(RegistryError::DuplicateCode(berth.code));
        }
        self.berths.insert(berth.id.clone(), berth);
        Ok(())
    }

    /// Admin: remove a berth permanently.
    ///
    /// Refused while the berth is bound to a placement.
    pub fn decommission(&mut self, berth_id: &str) -> Result<Berth, RegistryError> {
        let berth = self
            .berths
            .get(berth_id)
            .ok_or_else(|| RegistryError::BerthNotFound(berth_id.to_string()))?;
        if berth.status.is_bound() {
            return Err(RegistryError::ActivePlacement(berth_id.to_string()));
        }
        Ok(self
            .berths
            .remove(berth_id)
            .expect("berth existence checked above"))
    }

    pub fn get(&self, berth_id: &str) -> Option<&Berth> {
        self.berths.get(berth_id)
    }

    pub(crate) fn get_mut(&mut self, berth_id: &str) -> Option<&mut Berth> {
        self.berths.get_mut(berth_id)
    }

    /// Iterate all berths in deterministic id order.
    pub fn berths(&self) -> impl Iterator<Item = &Berth> {
        self.berths.values()
    }

    pub fn len(&self) -> usize {
        self.berths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.berths.is_empty()
    }

    /// Berths on one pontoon, stable order by code.
    pub fn list_by_pontoon(&self, pontoon: &str) -> Vec<&Berth> {
        let mut rows: Vec<&Berth> = self
            .berths
            .values()
            .filter(|berth| berth.pontoon == pontoon)
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));
        rows
    }

    /// All pontoon keys, sorted.
    pub fn pontoons(&self) -> Vec<String> {
        self.berths
            .values()
            .map(|berth| berth.pontoon.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Engine-internal status write.
    ///
    /// Keeps `status` and `assigned_boat_id` moving together; callers
    /// outside this crate must go through the assignment engine.
    pub(crate) fn set_status(
        &mut self,
        berth_id: &str,
        status: BerthStatus,
        boat_id: Option<String>,
    ) -> Result<&Berth, RegistryError> {
        let berth = self
            .berths
            .get_mut(berth_id)
            .ok_or_else(|| RegistryError::BerthNotFound(berth_id.to_string()))?;
        berth.status = status;
        berth.assigned_boat_id = boat_id;
        berth.touch_updated_at();
        Ok(berth)
    }
}
