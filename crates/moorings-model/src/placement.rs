//! Placement type: the record binding one boat to one berth.

use crate::geometry::{self, Envelope, Footprint, GeoPoint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Boat size category, smallest to largest.
///
/// The five tokens `xs,s,m,l,xl` are a closed vocabulary shared with
/// external UI adapters; the serialized form must match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoatSize {
    Xs,
    S,
    M,
    L,
    Xl,
}

impl BoatSize {
    /// All sizes, ascending.
    pub const ALL: [BoatSize; 5] = [
        BoatSize::Xs,
        BoatSize::S,
        BoatSize::M,
        BoatSize::L,
        BoatSize::Xl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoatSize::Xs => "xs",
            BoatSize::S => "s",
            BoatSize::M => "m",
            BoatSize::L => "l",
            BoatSize::Xl => "xl",
        }
    }

    /// Parse one of the five closed-vocabulary tokens.
    pub fn from_token(token: &str) -> Option<BoatSize> {
        BoatSize::ALL
            .into_iter()
            .find(|size| size.as_str() == token)
    }

    /// Physical envelope of this size category, in meters.
    pub fn envelope(&self) -> Envelope {
        geometry::envelope_for(*self)
    }
}

impl std::fmt::Display for BoatSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A boat placed on a berth, with its depicted position and heading.
///
/// The placement record is the boat's representation in this system;
/// `Berth::assigned_boat_id` carries the placement id while the binding
/// is active.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    pub id: String,
    pub berth_id: String,
    /// Berth code copied at placement time for display/audit. Not
    /// re-derived if the berth is later renamed.
    pub berth_code: String,
    pub size: BoatSize,
    /// Heading in degrees, 0 = north, normalized to [0, 360).
    pub rotation: f64,
    pub position: GeoPoint,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vessel_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vessel_registration: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vessel_image_url: String,

    /// Actor who created or last moved this placement.
    pub placed_by: String,
    pub placed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Placement {
    /// The oriented water footprint this placement occupies.
    pub fn footprint(&self) -> Footprint {
        Footprint {
            position: self.position,
            rotation: self.rotation,
            envelope: self.size.envelope(),
        }
    }

    pub fn touch_updated_at(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boat_size_tokens_match_the_closed_vocabulary() {
        let tokens: Vec<String> = BoatSize::ALL
            .iter()
            .map(|size| serde_json::to_string(size).expect("size should serialize"))
            .collect();
        assert_eq!(
            tokens,
            vec![
                "\"xs\"".to_string(),
                "\"s\"".to_string(),
                "\"m\"".to_string(),
                "\"l\"".to_string(),
                "\"xl\"".to_string(),
            ]
        );
    }

    #[test]
    fn boat_size_orders_smallest_to_largest() {
        assert!(BoatSize::Xs < BoatSize::S);
        assert!(BoatSize::M < BoatSize::L);
        assert!(BoatSize::L < BoatSize::Xl);
    }

    #[test]
    fn boat_size_round_trips_through_tokens() {
        for size in BoatSize::ALL {
            assert_eq!(BoatSize::from_token(size.as_str()), Some(size));
        }
        assert_eq!(BoatSize::from_token("xxl"), None);
    }

    #[test]
    fn empty_metadata_is_omitted_from_serialization() {
        let now = Utc::now();
        let placement = Placement {
            id: "plc-1".to_string(),
            berth_id: "berth-1".to_string(),
            berth_code: "B-05".to_string(),
            size: BoatSize::M,
            rotation: 0.0,
            position: GeoPoint::new(43.27, 5.35),
            vessel_name: String::new(),
            vessel_registration: String::new(),
            vessel_image_url: String::new(),
            placed_by: "op1".to_string(),
            placed_at: now,
            updated_at: now,
        };

        let raw = serde_json::to_string(&placement).expect("placement should serialize");
        assert!(!raw.contains("vessel_name"));

        let parsed: Placement = serde_json::from_str(&raw).expect("placement should parse");
        assert_eq!(parsed, placement);
    }
}
