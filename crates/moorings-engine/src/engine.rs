//! Assignment engine: the berth state machine.
//!
//! `Marina` owns the berth registry and the placement ledger and is the
//! sole mutation surface over them. Every command either commits both
//! invariant-relevant updates (registry status + ledger row) or leaves
//! state untouched.
//!
//! Legal transitions per berth:
//! - free → occupied (assign)
//! - occupied → occupied (relocate, metadata update)
//! - occupied ↔ reserved (reserve / unreserve, same boat)
//! - occupied | reserved → free (release)
//! - free ↔ maintenance (administrative toggle, no active placement)
//!
//! Berth status is treated as a cached projection of the ledger: each
//! command recomputes the touched berth's status/boat fields from
//! ledger ground truth before returning.

use crate::error::CommandError;
use crate::ledger::{LedgerError, PlacementLedger};
use crate::registry::{BerthRegistry, RegistryError};
use chrono::Utc;
use moorings_model::{
    Berth, BerthStatus, BoatSize, DEFAULT_OVERLAP_TOLERANCE_M, GeoPoint, Placement,
    footprints_overlap, normalize_rotation,
};
use uuid::Uuid;

/// Input to the assign command: the boat attributes to bind to a berth.
#[derive(Debug, Clone)]
pub struct AssignRequest {
    pub berth_id: String,
    pub size: BoatSize,
    /// Heading in degrees; normalized before storing. Defaults to 0.
    pub rotation: f64,
    /// Depicted location; defaults to the berth anchor.
    pub position: Option<GeoPoint>,
    pub vessel_name: String,
    pub vessel_registration: String,
    pub vessel_image_url: String,
    pub actor: String,
}

impl AssignRequest {
    pub fn new(berth_id: impl Into<String>, size: BoatSize, actor: impl Into<String>) -> Self {
        Self {
            berth_id: berth_id.into(),
            size,
            rotation: 0.0,
            position: None,
            vessel_name: String::new(),
            vessel_registration: String::new(),
            vessel_image_url: String::new(),
            actor: actor.into(),
        }
    }
}

/// Partial vessel metadata update. `None` leaves a field untouched; an
/// explicit empty string clears it.
#[derive(Debug, Clone, Default)]
pub struct MetadataPatch {
    pub vessel_name: Option<String>,
    pub vessel_registration: Option<String>,
    pub vessel_image_url: Option<String>,
}

/// One applied status reconciliation, reported by audit/repair.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RepairAction {
    pub berth_id: String,
    pub from_status: BerthStatus,
    pub to_status: BerthStatus,
    pub assigned_boat_id: Option<String>,
}

/// The marina aggregate: registry + ledger behind one command surface.
#[derive(Debug, Clone, Default)]
pub struct Marina {
    registry: BerthRegistry,
    ledger: PlacementLedger,
}

impl Marina {
    pub fn from_parts(registry: BerthRegistry, ledger: PlacementLedger) -> Self {
        Self { registry, ledger }
    }

    pub fn registry(&self) -> &BerthRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &PlacementLedger {
        &self.ledger
    }

    /// Admin: register a new berth (marina configuration).
    pub fn create_berth(&mut self, berth: Berth) -> Result<(), CommandError> {
        self.registry.create(berth).map_err(registry_admin_error)
    }

    /// Admin: permanently remove a berth. Refused while a placement is
    /// bound to it.
    pub fn decommission_berth(&mut self, berth_id: &str) -> Result<Berth, CommandError> {
        if self.ledger.get_by_berth(berth_id).is_some() {
            return Err(CommandError::BerthOccupied(berth_id.to_string()));
        }
        self.registry
            .decommission(berth_id)
            .map_err(registry_admin_error)
    }

    /// Assign a boat to a free berth, creating its placement.
    pub fn assign(&mut self, request: AssignRequest) -> Result<Placement, CommandError> {
        let berth = self
            .registry
            .get(&request.berth_id)
            .ok_or_else(|| CommandError::BerthNotFound(request.berth_id.clone()))?;

        if berth.status != BerthStatus::Free {
            return Err(CommandError::BerthNotFree {
                berth_id: berth.id.clone(),
                status: berth.status,
            });
        }
        if !berth.admits(request.size) {
            return Err(CommandError::SizeMismatch {
                berth_id: berth.id.clone(),
                requested: request.size,
                admissible: berth
                    .max_admissible_size()
                    .map(|size| size.as_str().to_string())
                    .unwrap_or_else(|| "none".to_string()),
            });
        }

        let rotation = normalize_rotation(request.rotation)?;
        let position = request.position.unwrap_or(berth.position);
        if !position.is_finite() {
            return Err(CommandError::Geometry(
                moorings_model::GeometryError::NonFinite("position"),
            ));
        }

        let now = Utc::now();
        let placement = Placement {
            id: format!("plc-{}", Uuid::new_v4()),
            berth_id: berth.id.clone(),
            berth_code: berth.code.clone(),
            size: request.size,
            rotation,
            position,
            vessel_name: request.vessel_name,
            vessel_registration: request.vessel_registration,
            vessel_image_url: request.vessel_image_url,
            placed_by: request.actor,
            placed_at: now,
            updated_at: now,
        };
        let berth_id = placement.berth_id.clone();
        let placement_id = placement.id.clone();

        self.ledger.insert(placement.clone()).map_err(|err| {
            // A live binding under a free-status berth is drift; report
            // the berth as not free rather than leaking ledger detail.
            match err {
                LedgerError::BerthAlreadyBound { berth_id, .. } => CommandError::BerthNotFree {
                    berth_id,
                    status: BerthStatus::Occupied,
                },
                other => CommandError::Storage(other.to_string()),
            }
        })?;
        self.registry
            .set_status(&berth_id, BerthStatus::Occupied, Some(placement_id))
            .map_err(|err| CommandError::Storage(err.to_string()))?;

        self.reconcile_berth(&berth_id);
        Ok(placement)
    }

    /// Move a placed boat: new depicted position and heading.
    ///
    /// Rejects moves whose footprint would overlap another placement on
    /// the same pontoon (hard-fail policy, 0.5 m tolerance). Berth
    /// status is unaffected.
    pub fn relocate(
        &mut self,
        placement_id: &str,
        position: GeoPoint,
        rotation: f64,
        actor: &str,
    ) -> Result<Placement, CommandError> {
        let rotation = normalize_rotation(rotation)?;
        if !position.is_finite() {
            return Err(CommandError::Geometry(
                moorings_model::GeometryError::NonFinite("position"),
            ));
        }

        let placement = self
            .ledger
            .get(placement_id)
            .ok_or_else(|| CommandError::PlacementNotFound(placement_id.to_string()))?;
        let berth = self
            .registry
            .get(&placement.berth_id)
            .ok_or_else(|| CommandError::BerthNotFound(placement.berth_id.clone()))?;
        let pontoon = berth.pontoon.clone();

        let candidate = moorings_model::Footprint {
            position,
            rotation,
            envelope: placement.size.envelope(),
        };
        for other in self.ledger.list_all() {
            if other.id == placement_id {
                continue;
            }
            let same_pontoon = self
                .registry
                .get(&other.berth_id)
                .is_some_and(|b| b.pontoon == pontoon);
            if !same_pontoon {
                continue;
            }
            if footprints_overlap(&candidate, &other.footprint(), DEFAULT_OVERLAP_TOLERANCE_M)? {
                return Err(CommandError::SpatialConflict {
                    placement_id: placement_id.to_string(),
                    other_id: other.id.clone(),
                });
            }
        }

        let berth_id = {
            let placement = self
                .ledger
                .get_mut(placement_id)
                .expect("placement existence checked above");
            placement.position = position;
            placement.rotation = rotation;
            placement.placed_by = actor.to_string();
            placement.touch_updated_at();
            placement.berth_id.clone()
        };

        self.reconcile_berth(&berth_id);
        Ok(self
            .ledger
            .get(placement_id)
            .expect("placement still present")
            .clone())
    }

    /// Partial update of vessel name/registration/image. Never touches
    /// berth status or the placement's position.
    pub fn update_metadata(
        &mut self,
        placement_id: &str,
        patch: MetadataPatch,
        _actor: &str,
    ) -> Result<Placement, CommandError> {
        let placement = self
            .ledger
            .get_mut(placement_id)
            .ok_or_else(|| CommandError::PlacementNotFound(placement_id.to_string()))?;

        if let Some(name) = patch.vessel_name {
            placement.vessel_name = name;
        }
        if let Some(registration) = patch.vessel_registration {
            placement.vessel_registration = registration;
        }
        if let Some(image_url) = patch.vessel_image_url {
            placement.vessel_image_url = image_url;
        }
        placement.touch_updated_at();
        Ok(placement.clone())
    }

    /// Mark an occupied berth as reserved. The placement is unchanged.
    pub fn reserve(&mut self, berth_id: &str, _actor: &str) -> Result<Berth, CommandError> {
        self.set_bound_status(berth_id, BerthStatus::Reserved)
    }

    /// Return a reserved berth to plain occupied.
    pub fn unreserve(&mut self, berth_id: &str, _actor: &str) -> Result<Berth, CommandError> {
        self.set_bound_status(berth_id, BerthStatus::Occupied)
    }

    /// Remove the berth's placement and return it to free. Destruction
    /// of the placement is the only way a berth becomes free again.
    pub fn release(&mut self, berth_id: &str, _actor: &str) -> Result<Berth, CommandError> {
        if self.registry.get(berth_id).is_none() {
            return Err(CommandError::BerthNotFound(berth_id.to_string()));
        }
        let placement_id = self
            .ledger
            .get_by_berth(berth_id)
            .map(|placement| placement.id.clone())
            .ok_or_else(|| CommandError::NoActivePlacement(berth_id.to_string()))?;

        self.ledger
            .remove(&placement_id)
            .map_err(|err| CommandError::Storage(err.to_string()))?;
        self.registry
            .set_status(berth_id, BerthStatus::Free, None)
            .map_err(|err| CommandError::Storage(err.to_string()))?;

        self.reconcile_berth(berth_id);
        Ok(self
            .registry
            .get(berth_id)
            .expect("berth existence checked above")
            .clone())
    }

    /// Administrative maintenance toggle. Only legal without an active
    /// placement.
    pub fn set_maintenance(
        &mut self,
        berth_id: &str,
        on: bool,
        _actor: &str,
    ) -> Result<Berth, CommandError> {
        if self.registry.get(berth_id).is_none() {
            return Err(CommandError::BerthNotFound(berth_id.to_string()));
        }
        if self.ledger.get_by_berth(berth_id).is_some() {
            return Err(CommandError::BerthOccupied(berth_id.to_string()));
        }

        let status = if on {
            BerthStatus::Maintenance
        } else {
            BerthStatus::Free
        };
        let berth = self
            .registry
            .set_status(berth_id, status, None)
            .map_err(|err| CommandError::Storage(err.to_string()))?;
        Ok(berth.clone())
    }

    /// Recompute one berth's cached status/boat fields from ledger
    /// ground truth. Returns the applied correction, if any drift was
    /// found.
    pub(crate) fn reconcile_berth(&mut self, berth_id: &str) -> Option<RepairAction> {
        let active = self
            .ledger
            .get_by_berth(berth_id)
            .map(|placement| placement.id.clone());
        let berth = self.registry.get_mut(berth_id)?;

        let expected_status = match (&active, berth.status) {
            (Some(_), status) if status.is_bound() => status,
            (Some(_), _) => BerthStatus::Occupied,
            (None, status) if !status.is_bound() => status,
            (None, _) => BerthStatus::Free,
        };

        if berth.status == expected_status && berth.assigned_boat_id == active {
            return None;
        }

        let action = RepairAction {
            berth_id: berth.id.clone(),
            from_status: berth.status,
            to_status: expected_status,
            assigned_boat_id: active.clone(),
        };
        berth.status = expected_status;
        berth.assigned_boat_id = active;
        berth.touch_updated_at();
        Some(action)
    }

    fn set_bound_status(
        &mut self,
        berth_id: &str,
        status: BerthStatus,
    ) -> Result<Berth, CommandError> {
        if self.registry.get(berth_id).is_none() {
            return Err(CommandError::BerthNotFound(berth_id.to_string()));
        }
        let placement_id = self
            .ledger
            .get_by_berth(berth_id)
            .map(|placement| placement.id.clone())
            .ok_or_else(|| CommandError::NoActivePlacement(berth_id.to_string()))?;

        let berth = self
            .registry
            .set_status(berth_id, status, Some(placement_id))
            .map_err(|err| CommandError::Storage(err.to_string()))?;
        Ok(berth.clone())
    }
}

fn registry_admin_error(err: RegistryError) -> CommandError {
    match err {
        RegistryError::BerthNotFound(id) => CommandError::BerthNotFound(id),
        RegistryError::ActivePlacement(id) => CommandError::BerthOccupied(id),
        other => CommandError::Storage(other.to_string()),
    }
}
