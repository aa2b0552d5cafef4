//! Berth type: a fixed, addressable docking slot.

use crate::geometry::{Envelope, GeoPoint};
use crate::placement::BoatSize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Berth occupancy status.
///
/// A closed vocabulary shared with external UI adapters; the serialized
/// form must match the lowercase tokens exactly. `occupied` and
/// `reserved` hold iff the berth has an active placement; `free` and
/// `maintenance` iff it has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BerthStatus {
    Free,
    Occupied,
    Reserved,
    Maintenance,
}

impl BerthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BerthStatus::Free => "free",
            BerthStatus::Occupied => "occupied",
            BerthStatus::Reserved => "reserved",
            BerthStatus::Maintenance => "maintenance",
        }
    }

    /// Whether this status implies an active placement.
    pub fn is_bound(&self) -> bool {
        matches!(self, BerthStatus::Occupied | BerthStatus::Reserved)
    }
}

impl std::fmt::Display for BerthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed docking slot at the marina.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Berth {
    pub id: String,
    /// Human-readable slot label, pontoon prefix + number (e.g. `B-05`).
    /// Unique within the marina.
    pub code: String,
    /// Physical structure this berth belongs to.
    pub pontoon: String,
    /// Geographic anchor point.
    pub position: GeoPoint,
    /// Physical slot size in meters; admissible boat size derives from
    /// it.
    pub footprint: Envelope,
    #[serde(default = "default_status")]
    pub status: BerthStatus,
    /// Present iff status is occupied or reserved; equals the id of the
    /// active placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_boat_id: Option<String>,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_timestamp")]
    pub updated_at: DateTime<Utc>,
}

fn default_status() -> BerthStatus {
    BerthStatus::Free
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

impl Berth {
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        pontoon: impl Into<String>,
        position: GeoPoint,
        footprint: Envelope,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            code: code.into(),
            pontoon: pontoon.into(),
            position,
            footprint,
            status: BerthStatus::Free,
            assigned_boat_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The largest boat size category this berth's footprint can hold,
    /// or `None` if even the smallest category overflows it.
    pub fn max_admissible_size(&self) -> Option<BoatSize> {
        BoatSize::ALL
            .into_iter()
            .rev()
            .find(|size| self.footprint.contains(&size.envelope()))
    }

    /// Whether a boat of the given size fits this berth.
    pub fn admits(&self, size: BoatSize) -> bool {
        self.footprint.contains(&size.envelope())
    }

    pub fn touch_updated_at(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berth_with_footprint(width_m: f64, length_m: f64) -> Berth {
        Berth::new(
            "berth-1",
            "B-05",
            "B",
            GeoPoint::new(43.27, 5.35),
            Envelope::new(width_m, length_m),
        )
    }

    #[test]
    fn status_tokens_match_the_closed_vocabulary() {
        let statuses = [
            BerthStatus::Free,
            BerthStatus::Occupied,
            BerthStatus::Reserved,
            BerthStatus::Maintenance,
        ];
        let tokens: Vec<String> = statuses
            .iter()
            .map(|status| serde_json::to_string(status).expect("status should serialize"))
            .collect();
        assert_eq!(
            tokens,
            vec![
                "\"free\"".to_string(),
                "\"occupied\"".to_string(),
                "\"reserved\"".to_string(),
                "\"maintenance\"".to_string(),
            ]
        );
    }

    #[test]
    fn max_admissible_size_picks_the_largest_fit() {
        // Fits m (3.8 x 10) but not l (4.5 x 13).
        let berth = berth_with_footprint(4.0, 11.0);
        assert_eq!(berth.max_admissible_size(), Some(BoatSize::M));
        assert!(berth.admits(BoatSize::S));
        assert!(!berth.admits(BoatSize::L));
    }

    #[test]
    fn undersized_footprint_admits_nothing() {
        let berth = berth_with_footprint(2.0, 5.0);
        assert_eq!(berth.max_admissible_size(), None);
        assert!(!berth.admits(BoatSize::Xs));
    }

    #[test]
    fn footprint_must_fit_both_dimensions() {
        // Wide enough for xl, far too short.
        let berth = berth_with_footprint(6.0, 7.0);
        assert_eq!(berth.max_admissible_size(), Some(BoatSize::Xs));
    }
}
