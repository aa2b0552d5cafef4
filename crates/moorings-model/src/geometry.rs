//! Pure geometry: size envelopes, rotation normalization, oriented
//! footprints, and overlap testing.
//!
//! Everything here is stateless. Positions are WGS84 lat/lng; footprint
//! math happens in a local tangent-plane meter frame, which is accurate
//! at marina scale (tens to hundreds of meters).

use crate::placement::BoatSize;
use serde::{Deserialize, Serialize};

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Shrink applied to each footprint dimension before overlap testing.
///
/// Two placements whose hulls come closer than this still count as
/// clear; anything tighter is a spatial conflict. The relocate command
/// hard-fails on conflict rather than warn-and-allow.
pub const DEFAULT_OVERLAP_TOLERANCE_M: f64 = 0.5;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A physical rectangle in meters: beam (width) by overall length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub width_m: f64,
    pub length_m: f64,
}

impl Envelope {
    pub fn new(width_m: f64, length_m: f64) -> Self {
        Self { width_m, length_m }
    }

    /// Whether `other` fits inside this envelope in both dimensions.
    pub fn contains(&self, other: &Envelope) -> bool {
        self.width_m >= other.width_m && self.length_m >= other.length_m
    }

    fn shrunk_by(&self, tolerance_m: f64) -> Envelope {
        Envelope {
            width_m: (self.width_m - tolerance_m).max(0.0),
            length_m: (self.length_m - tolerance_m).max(0.0),
        }
    }
}

/// An oriented boat footprint: where a hull occupies water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub position: GeoPoint,
    /// Heading in degrees, 0 = north, already normalized to [0, 360).
    pub rotation: f64,
    pub envelope: Envelope,
}

/// Errors from malformed numeric input. Geometry has no other failure
/// modes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("non-finite {0} value")]
    NonFinite(&'static str),
}

/// Physical envelope for a boat size category, in meters.
///
/// Monotonically increasing in both dimensions across the scale.
pub fn envelope_for(size: BoatSize) -> Envelope {
    match size {
        BoatSize::Xs => Envelope::new(2.5, 6.0),
        BoatSize::S => Envelope::new(3.0, 8.0),
        BoatSize::M => Envelope::new(3.8, 10.0),
        BoatSize::L => Envelope::new(4.5, 13.0),
        BoatSize::Xl => Envelope::new(5.5, 17.0),
    }
}

/// Reduce a heading in degrees to [0, 360).
///
/// Negative inputs wrap: -10 → 350. NaN and infinities are rejected.
pub fn normalize_rotation(deg: f64) -> Result<f64, GeometryError> {
    if !deg.is_finite() {
        return Err(GeometryError::NonFinite("rotation"));
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360.0.
    if wrapped >= 360.0 {
        Ok(0.0)
    } else {
        Ok(wrapped)
    }
}

/// The rotated rectangle a boat occupies, as four corners in lat/lng.
///
/// Corner order is counter-clockwise starting at the stern-port corner
/// for rotation 0.
pub fn oriented_bounds(
    position: GeoPoint,
    rotation: f64,
    envelope: Envelope,
) -> Result<[GeoPoint; 4], GeometryError> {
    if !position.is_finite() {
        return Err(GeometryError::NonFinite("position"));
    }
    let rotation = normalize_rotation(rotation)?;

    let meters_per_degree_lng = METERS_PER_DEGREE_LAT * position.lat.to_radians().cos();
    let corners = rect_corners_m((0.0, 0.0), rotation, envelope);
    Ok(corners.map(|(east, north)| GeoPoint {
        lat: position.lat + north / METERS_PER_DEGREE_LAT,
        lng: position.lng + east / meters_per_degree_lng,
    }))
}

/// Whether two oriented footprints intersect, after shrinking each
/// envelope by `tolerance_m` in both dimensions.
///
/// Separating-axis test over the four rectangle axes, computed in a
/// local meter frame anchored at `a`.
pub fn footprints_overlap(
    a: &Footprint,
    b: &Footprint,
    tolerance_m: f64,
) -> Result<bool, GeometryError> {
    if !a.position.is_finite() || !b.position.is_finite() {
        return Err(GeometryError::NonFinite("position"));
    }
    if !tolerance_m.is_finite() {
        return Err(GeometryError::NonFinite("tolerance"));
    }
    let rot_a = normalize_rotation(a.rotation)?;
    let rot_b = normalize_rotation(b.rotation)?;

    let meters_per_degree_lng = METERS_PER_DEGREE_LAT * a.position.lat.to_radians().cos();
    let b_center = (
        (b.position.lng - a.position.lng) * meters_per_degree_lng,
        (b.position.lat - a.position.lat) * METERS_PER_DEGREE_LAT,
    );

    let corners_a = rect_corners_m((0.0, 0.0), rot_a, a.envelope.shrunk_by(tolerance_m));
    let corners_b = rect_corners_m(b_center, rot_b, b.envelope.shrunk_by(tolerance_m));

    let mut axes = [(0.0, 0.0); 4];
    axes[..2].copy_from_slice(&rect_axes(rot_a));
    axes[2..].copy_from_slice(&rect_axes(rot_b));

    for axis in axes {
        let (min_a, max_a) = project(&corners_a, axis);
        let (min_b, max_b) = project(&corners_b, axis);
        if max_a < min_b || max_b < min_a {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Corners of a rotated rectangle in the local (east, north) meter
/// frame. Rotation is compass-style: degrees clockwise from north.
fn rect_corners_m(center: (f64, f64), rotation: f64, envelope: Envelope) -> [(f64, f64); 4] {
    let theta = rotation.to_radians();
    let (sin, cos) = theta.sin_cos();
    let hw = envelope.width_m / 2.0;
    let hl = envelope.length_m / 2.0;

    [(-hw, -hl), (hw, -hl), (hw, hl), (-hw, hl)].map(|(x, y)| {
        let east = x * cos + y * sin;
        let north = y * cos - x * sin;
        (center.0 + east, center.1 + north)
    })
}

/// The two edge axes of a rectangle with the given compass rotation.
fn rect_axes(rotation: f64) -> [(f64, f64); 2] {
    let theta = rotation.to_radians();
    let (sin, cos) = theta.sin_cos();
    [(cos, -sin), (sin, cos)]
}

fn project(corners: &[(f64, f64); 4], axis: (f64, f64)) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (x, y) in corners {
        let dot = x * axis.0 + y * axis.1;
        min = min.min(dot);
        max = max.max(dot);
    }
    (min, max)
}
