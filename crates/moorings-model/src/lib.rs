//! # moorings-model
//!
//! Domain types for the berth occupancy and placement model.
//!
//! This crate provides:
//! - `Berth` and `BerthStatus` (the docking slots)
//! - `Placement` and `BoatSize` (the boat ↔ berth bindings)
//! - pure geometry: size envelopes, rotation normalization, oriented
//!   footprints, and overlap testing
//!
//! It intentionally holds no mutable state and performs no I/O. The
//! registries, the command engine, and persistence live in
//! `moorings-engine`.

pub mod berth;
pub mod geometry;
pub mod placement;

pub use berth::{Berth, BerthStatus};
pub use geometry::{
    DEFAULT_OVERLAP_TOLERANCE_M, Envelope, Footprint, GeoPoint, GeometryError,
    METERS_PER_DEGREE_LAT, envelope_for, footprints_overlap, normalize_rotation, oriented_bounds,
};
pub use placement::{BoatSize, Placement};
