//! Marina layout files: TOML berth declarations for `init`.
//!
//! A layout file declares the physical berths once, before any
//! placements exist:
//!
//! ```toml
//! [[berth]]
//! code = "B-05"
//! lat = 43.2705
//! lng = 5.3504
//! width_m = 4.0
//! length_m = 11.0
//! ```
//!
//! `id` defaults to `berth-` plus the lowercased code, and `pontoon`
//! defaults to the code prefix before the dash.

use moorings_model::{Berth, Envelope, GeoPoint};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Berth codes: pontoon letters/digits, dash, slot number.
const BERTH_CODE_PATTERN: &str = "^[A-Za-z0-9]+-[0-9]+$";

fn berth_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BERTH_CODE_PATTERN).expect("berth code pattern should compile"))
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("failed to read layout {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse layout {path}: {message}")]
    Parse { path: String, message: String },

    #[error("berth code {0:?} does not match {BERTH_CODE_PATTERN}")]
    InvalidCode(String),

    #[error("duplicate berth code in layout: {0}")]
    DuplicateCode(String),

    #[error("duplicate berth id in layout: {0}")]
    DuplicateId(String),

    #[error("berth {code}: {field} must be finite and positive")]
    InvalidDimension { code: String, field: &'static str },

    #[error("berth {code}: coordinates must be finite")]
    NonFiniteCoordinate { code: String },
}

#[derive(Debug, Deserialize)]
struct LayoutFile {
    #[serde(default, rename = "berth")]
    berths: Vec<BerthDecl>,
}

#[derive(Debug, Deserialize)]
struct BerthDecl {
    #[serde(default)]
    id: String,
    code: String,
    #[serde(default)]
    pontoon: String,
    lat: f64,
    lng: f64,
    width_m: f64,
    length_m: f64,
}

impl BerthDecl {
    fn into_berth(self) -> Result<Berth, LayoutError> {
        if !berth_code_regex().is_match(&self.code) {
            return Err(LayoutError::InvalidCode(self.code));
        }
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(LayoutError::NonFiniteCoordinate { code: self.code });
        }
        for (field, value) in [("width_m", self.width_m), ("length_m", self.length_m)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidDimension {
                    code: self.code,
                    field,
                });
            }
        }

        let id = if self.id.is_empty() {
            format!("berth-{}", self.code.to_lowercase())
        } else {
            self.id
        };
        let pontoon = if self.pontoon.is_empty() {
            self.code
                .split('-')
                .next()
                .unwrap_or(self.code.as_str())
                .to_string()
        } else {
            self.pontoon
        };

        Ok(Berth::new(
            id,
            self.code,
            pontoon,
            GeoPoint::new(self.lat, self.lng),
            Envelope::new(self.width_m, self.length_m),
        ))
    }
}

/// Parse layout TOML text into berths.
pub fn parse_layout(path_label: &str, text: &str) -> Result<Vec<Berth>, LayoutError> {
    let file: LayoutFile = toml::from_str(text).map_err(|e| LayoutError::Parse {
        path: path_label.to_string(),
        message: e.to_string(),
    })?;

    let mut seen_codes = BTreeSet::new();
    let mut seen_ids = BTreeSet::new();
    let mut berths = Vec::with_capacity(file.berths.len());
    for decl in file.berths {
        let berth = decl.into_berth()?;
        if !seen_codes.insert(berth.code.clone()) {
            return Err(LayoutError::DuplicateCode(berth.code));
        }
        if !seen_ids.insert(berth.id.clone()) {
            return Err(LayoutError::DuplicateId(berth.id));
        }
        berths.push(berth);
    }
    Ok(berths)
}

/// Load and parse a layout file from disk.
pub fn load_layout(path: impl AsRef<Path>) -> Result<Vec<Berth>, LayoutError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LayoutError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_layout(&path.display().to_string(), &text)
}
