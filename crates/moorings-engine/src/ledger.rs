//! Placement ledger: the authoritative set of boat ↔ berth bindings.
//!
//! Mutations are crate-internal, same access discipline as the berth
//! registry. The ledger structurally enforces the 1:1 active binding:
//! at most one placement per berth.

use moorings_model::Placement;
use std::collections::BTreeMap;

/// Errors raised while building or mutating the ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("placement not found: {0}")]
    PlacementNotFound(String),

    #[error("placement id already exists: {0}")]
    DuplicateId(String),

    #[error("berth {berth_id} is already bound to placement {existing_placement_id}")]
    BerthAlreadyBound {
        berth_id: String,
        existing_placement_id: String,
    },
}

/// Placement state keyed by id, with a berth-binding index.
#[derive(Debug, Clone, Default)]
pub struct PlacementLedger {
    placements: BTreeMap<String, Placement>,
    by_berth: BTreeMap<String, String>,
}

impl PlacementLedger {
    /// Build a ledger from fully-materialized placements, enforcing the
    /// one-placement-per-berth invariant.
    pub fn from_placements(placements: Vec<Placement>) -> Result<Self, LedgerError> {
        let mut ledger = Self::default();
        for placement in placements {
            ledger.insert(placement)?;
        }
        Ok(ledger)
    }

    pub fn get(&self, placement_id: &str) -> Option<&Placement> {
        self.placements.get(placement_id)
    }

    /// The active placement bound to a berth, if any.
    pub fn get_by_berth(&self, berth_id: &str) -> Option<&Placement> {
        self.by_berth
            .get(berth_id)
            .and_then(|placement_id| self.placements.get(placement_id))
    }

    /// Iterate all placements in deterministic id order.
    pub fn list_all(&self) -> impl Iterator<Item = &Placement> {
        self.placements.values()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub(crate) fn insert(&mut self, placement: Placement) -> Result<(), LedgerError> {
        if self.placements.contains_key(&placement.id) {
            return Err(LedgerError::DuplicateId(placement.id));
        }
        if let Some(existing) = self.by_berth.get(&placement.berth_id) {
            return Err(LedgerError::BerthAlreadyBound {
                berth_id: placement.berth_id,
                existing_placement_id: existing.clone(),
            });
        }
        self.by_berth
            .insert(placement.berth_id.clone(), placement.id.clone());
        self.placements.insert(placement.id.clone(), placement);
        Ok(())
    }

    pub(crate) fn get_mut(&mut self, placement_id: &str) -> Option<&mut Placement> {
        self.placements.get_mut(placement_id)
    }

    pub(crate) fn remove(&mut self, placement_id: &str) -> Result<Placement, LedgerError> {
        let placement = self
            .placements
            .remove(placement_id)
            .ok_or_else(|| LedgerError::PlacementNotFound(placement_id.to_string()))?;
        self.by_berth.remove(&placement.berth_id);
        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use moorings_model::{BoatSize, GeoPoint};

    fn placement(id: &str, berth_id: &str) -> Placement {
        let now = Utc::now();
        Placement {
            id: id.to_string(),
            berth_id: berth_id.to_string(),
            berth_code: "B-01".to_string(),
            size: BoatSize::M,
            rotation: 0.0,
            position: GeoPoint::new(43.27, 5.35),
            vessel_name: String::new(),
            vessel_registration: String::new(),
            vessel_image_url: String::new(),
            placed_by: "op1".to_string(),
            placed_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn insert_rejects_second_placement_for_a_berth() {
        let mut ledger = PlacementLedger::from_placements(vec![placement("plc-1", "berth-1")])
            .expect("ledger should build");

        let err = ledger
            .insert(placement("plc-2", "berth-1"))
            .expect_err("second binding must be rejected");
        assert!(matches!(
            err,
            LedgerError::BerthAlreadyBound {
                berth_id,
                existing_placement_id,
            } if berth_id == "berth-1" && existing_placement_id == "plc-1"
        ));
    }

    #[test]
    fn remove_clears_the_berth_binding() {
        let mut ledger = PlacementLedger::from_placements(vec![placement("plc-1", "berth-1")])
            .expect("ledger should build");

        let removed = ledger.remove("plc-1").expect("placement should remove");
        assert_eq!(removed.id, "plc-1");
        assert!(ledger.get_by_berth("berth-1").is_none());

        // Berth is rebindable after removal.
        ledger
            .insert(placement("plc-2", "berth-1"))
            .expect("berth should rebind after removal");
        assert_eq!(
            ledger
                .get_by_berth("berth-1")
                .expect("binding should exist")
                .id,
            "plc-2"
        );
    }

    #[test]
    fn remove_unknown_placement_errors() {
        let mut ledger = PlacementLedger::default();
        let err = ledger
            .remove("plc-missing")
            .expect_err("missing placement must error");
        assert!(matches!(err, LedgerError::PlacementNotFound(id) if id == "plc-missing"));
    }
}
