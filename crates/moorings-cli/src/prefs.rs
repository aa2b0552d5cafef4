//! Operator preferences: a small TOML file next to the state.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Map rendering mode preferred by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Desktop,
    Mobile,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Desktop => "desktop",
            ViewMode::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub view_mode: ViewMode,
}

/// Load preferences; a missing file yields defaults.
pub fn load_prefs(path: impl AsRef<Path>) -> Result<Prefs, String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Prefs::default());
    }
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    toml::from_str(&text).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

pub fn save_prefs(path: impl AsRef<Path>, prefs: &Prefs) -> Result<(), String> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    let text = toml::to_string_pretty(prefs).map_err(|e| e.to_string())?;
    fs::write(path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))
}
