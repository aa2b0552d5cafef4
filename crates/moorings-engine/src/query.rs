//! Read-only projections over the registry and ledger.
//!
//! Nothing here mutates; queries compose committed state for map and
//! list rendering.

use crate::engine::Marina;
use moorings_model::{Berth, BerthStatus, BoatSize, Placement};
use serde::Serialize;

/// Berth counts by status for one pontoon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PontoonOccupancy {
    pub pontoon: String,
    pub total: usize,
    pub free: usize,
    pub occupied: usize,
    pub reserved: usize,
    pub maintenance: usize,
    /// Bound berths (occupied + reserved) over total.
    pub occupancy_rate: f64,
}

/// One berth joined with its active placement, if any.
#[derive(Debug, Clone, Serialize)]
pub struct BerthView {
    pub berth: Berth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

/// Full map snapshot for rendering, ordered by berth code.
#[derive(Debug, Clone, Serialize)]
pub struct MapSnapshot {
    pub berths: Vec<BerthView>,
}

impl Marina {
    /// Occupancy summary per pontoon, sorted by pontoon key.
    pub fn occupancy_by_pontoon(&self) -> Vec<PontoonOccupancy> {
        self.registry()
            .pontoons()
            .into_iter()
            .map(|pontoon| {
                let berths = self.registry().list_by_pontoon(&pontoon);
                let total = berths.len();
                let count = |status: BerthStatus| {
                    berths.iter().filter(|berth| berth.status == status).count()
                };
                let occupied = count(BerthStatus::Occupied);
                let reserved = count(BerthStatus::Reserved);
                PontoonOccupancy {
                    pontoon,
                    total,
                    free: count(BerthStatus::Free),
                    occupied,
                    reserved,
                    maintenance: count(BerthStatus::Maintenance),
                    occupancy_rate: if total == 0 {
                        0.0
                    } else {
                        (occupied + reserved) as f64 / total as f64
                    },
                }
            })
            .collect()
    }

    /// Free berths that admit at least the given size, ordered by code.
    pub fn free_berths_with_min_size(&self, min: BoatSize) -> Vec<&Berth> {
        let mut rows: Vec<&Berth> = self
            .registry()
            .berths()
            .filter(|berth| berth.status == BerthStatus::Free && berth.admits(min))
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));
        rows
    }

    /// Berths joined with their active placements, ordered by code.
    pub fn map_snapshot(&self) -> MapSnapshot {
        let mut berths: Vec<BerthView> = self
            .registry()
            .berths()
            .map(|berth| BerthView {
                berth: berth.clone(),
                placement: self.ledger().get_by_berth(&berth.id).cloned(),
            })
            .collect();
        berths.sort_by(|a, b| a.berth.code.cmp(&b.berth.code));
        MapSnapshot { berths }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AssignRequest;
    use crate::ledger::PlacementLedger;
    use crate::registry::BerthRegistry;
    use moorings_model::{Envelope, GeoPoint};

    fn marina() -> Marina {
        let mk = |id: &str, code: &str, pontoon: &str, width: f64, length: f64| {
            Berth::new(
                id,
                code,
                pontoon,
                GeoPoint::new(43.27, 5.35),
                Envelope::new(width, length),
            )
        };
        let registry = BerthRegistry::from_berths(vec![
            mk("berth-b01", "B-01", "B", 4.0, 11.0),
            mk("berth-b02", "B-02", "B", 6.0, 18.0),
            mk("berth-c01", "C-01", "C", 3.2, 9.0),
        ])
        .expect("registry should build");
        Marina::from_parts(registry, PlacementLedger::default())
    }

    #[test]
    fn occupancy_counts_by_pontoon() {
        let mut marina = marina();
        marina
            .assign(AssignRequest::new("berth-b01", BoatSize::M, "op1"))
            .expect("assign should succeed");
        marina
            .assign(AssignRequest::new("berth-b02", BoatSize::Xl, "op1"))
            .expect("assign should succeed");
        marina.reserve("berth-b02", "op1").expect("reserve");

        let rows = marina.occupancy_by_pontoon();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pontoon, "B");
        assert_eq!(rows[0].total, 2);
        assert_eq!(rows[0].occupied, 1);
        assert_eq!(rows[0].reserved, 1);
        assert_eq!(rows[0].free, 0);
        assert!((rows[0].occupancy_rate - 1.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].pontoon, "C");
        assert_eq!(rows[1].free, 1);
        assert_eq!(rows[1].occupancy_rate, 0.0);
    }

    #[test]
    fn free_berth_search_filters_by_admissible_size() {
        let marina = marina();

        let codes = |rows: Vec<&Berth>| {
            rows.iter()
                .map(|berth| berth.code.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(
            codes(marina.free_berths_with_min_size(BoatSize::S)),
            vec!["B-01".to_string(), "B-02".to_string(), "C-01".to_string()]
        );
        assert_eq!(
            codes(marina.free_berths_with_min_size(BoatSize::L)),
            vec!["B-02".to_string()]
        );
    }

    #[test]
    fn free_berth_search_excludes_non_free_statuses() {
        let mut marina = marina();
        marina
            .assign(AssignRequest::new("berth-b02", BoatSize::L, "op1"))
            .expect("assign should succeed");
        marina
            .set_maintenance("berth-b01", true, "admin")
            .expect("maintenance");

        assert!(marina.free_berths_with_min_size(BoatSize::L).is_empty());
        assert_eq!(
            marina.free_berths_with_min_size(BoatSize::Xs).len(),
            1 // only C-01 remains free
        );
    }

    #[test]
    fn map_snapshot_joins_berths_with_placements() {
        let mut marina = marina();
        let placement = marina
            .assign(AssignRequest::new("berth-b01", BoatSize::M, "op1"))
            .expect("assign should succeed");

        let snapshot = marina.map_snapshot();
        assert_eq!(snapshot.berths.len(), 3);
        assert_eq!(snapshot.berths[0].berth.code, "B-01");
        assert_eq!(
            snapshot.berths[0]
                .placement
                .as_ref()
                .expect("joined placement")
                .id,
            placement.id
        );
        assert!(snapshot.berths[1].placement.is_none());
        assert!(snapshot.berths[2].placement.is_none());
    }
}
