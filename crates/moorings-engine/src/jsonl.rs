//! JSONL state file: one tagged record per line.
//!
//! The portable persistence format. Berth records come before placement
//! records, each sorted by id, so a saved file is deterministic for a
//! given marina state. Writes go through a temp file with fsync and
//! rename, so readers only ever see a complete state.

use crate::engine::Marina;
use crate::ledger::{LedgerError, PlacementLedger};
use crate::registry::{BerthRegistry, RegistryError};
use moorings_model::{Berth, Placement};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// One line of the state file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StateRecord {
    Berth(Berth),
    Placement(Placement),
}

/// Errors from state-file operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("line {0}: I/O error: {1}")]
    Io(usize, String),

    #[error("line {0}: parse error: {1}")]
    Parse(usize, String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("corrupted state file: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Read state records from a JSONL reader.
pub fn read_records(reader: impl BufRead) -> Result<Vec<StateRecord>, StateError> {
    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| StateError::Io(line_no + 1, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record: StateRecord = serde_json::from_str(trimmed)
            .map_err(|e| StateError::Parse(line_no + 1, e.to_string()))?;
        records.push(record);
    }
    Ok(records)
}

/// Write state records to a JSONL writer.
pub fn write_records(writer: &mut impl Write, records: &[StateRecord]) -> Result<(), StateError> {
    for record in records {
        let line =
            serde_json::to_string(record).map_err(|e| StateError::Serialize(e.to_string()))?;
        writeln!(writer, "{line}").map_err(|e| StateError::Io(0, e.to_string()))?;
    }
    Ok(())
}

/// Load a full marina from a state file path.
pub fn load_marina(path: impl AsRef<Path>) -> Result<Marina, StateError> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|e| StateError::Io(0, format!("{}: {e}", path.display())))?;
    validate_substrate_bytes(path, &bytes)?;
    let records = read_records(BufReader::new(bytes.as_slice()))?;

    let mut berths = Vec::new();
    let mut placements = Vec::new();
    for record in records {
        match record {
            StateRecord::Berth(berth) => berths.push(berth),
            StateRecord::Placement(placement) => placements.push(placement),
        }
    }

    let registry = BerthRegistry::from_berths(berths)?;
    let ledger = PlacementLedger::from_placements(placements)?;
    Ok(Marina::from_parts(registry, ledger))
}

/// Save a marina to a state file path, atomically.
///
/// Berths first, then placements, both in id order.
pub fn save_marina(path: impl AsRef<Path>, marina: &Marina) -> Result<(), StateError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StateError::Io(0, format!("{parent:?}: {e}")))?;
    }

    let records: Vec<StateRecord> = marina
        .registry()
        .berths()
        .cloned()
        .map(StateRecord::Berth)
        .chain(
            marina
                .ledger()
                .list_all()
                .cloned()
                .map(StateRecord::Placement),
        )
        .collect();

    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> Result<(), StateError> {
        let file = File::create(&tmp_path)
            .map_err(|e| StateError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        let mut writer = BufWriter::new(file);
        write_records(&mut writer, &records)?;
        writer
            .flush()
            .map_err(|e| StateError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        let file = writer
            .into_inner()
            .map_err(|e| StateError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        file.sync_all()
            .map_err(|e| StateError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StateError::Io(
            0,
            format!("{} -> {}: {e}", tmp_path.display(), path.display()),
        )
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        let dir = File::open(parent)
            .map_err(|e| StateError::Io(0, format!("{}: {e}", parent.display())))?;
        dir.sync_all()
            .map_err(|e| StateError::Io(0, format!("{}: {e}", parent.display())))?;
    }

    Ok(())
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}

fn validate_substrate_bytes(path: &Path, bytes: &[u8]) -> Result<(), StateError> {
    if bytes.contains(&0) {
        return Err(StateError::Corrupt(format!(
            "{}: contains NUL byte(s)",
            path.display()
        )));
    }
    if std::str::from_utf8(bytes).is_err() {
        return Err(StateError::Corrupt(format!(
            "{}: contains non-UTF-8 byte sequence(s)",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AssignRequest;
    use moorings_model::{BoatSize, Envelope, GeoPoint};

    fn temp_path(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "moorings-jsonl-{prefix}-{}-{unique}.jsonl",
            std::process::id()
        ))
    }

    fn marina() -> Marina {
        let registry = BerthRegistry::from_berths(vec![
            Berth::new(
                "berth-b01",
                "B-01",
                "B",
                GeoPoint::new(43.27, 5.35),
                Envelope::new(4.0, 11.0),
            ),
            Berth::new(
                "berth-b02",
                "B-02",
                "B",
                GeoPoint::new(43.27, 5.3504),
                Envelope::new(6.0, 18.0),
            ),
        ])
        .expect("registry should build");
        Marina::from_parts(registry, PlacementLedger::default())
    }

    #[test]
    fn save_load_round_trips_full_state() {
        let path = temp_path("roundtrip");
        let mut marina = marina();
        let placement = marina
            .assign(AssignRequest::new("berth-b01", BoatSize::M, "op1"))
            .expect("assign should succeed");
        marina.reserve("berth-b01", "op1").expect("reserve");

        save_marina(&path, &marina).expect("state should save");
        let reloaded = load_marina(&path).expect("state should load");

        assert_eq!(reloaded.registry().len(), 2);
        assert_eq!(reloaded.ledger().len(), 1);
        assert_eq!(
            reloaded.registry().get("berth-b01").expect("berth").status,
            moorings_model::BerthStatus::Reserved
        );
        assert_eq!(
            reloaded
                .ledger()
                .get(&placement.id)
                .expect("placement should survive"),
            marina.ledger().get(&placement.id).expect("placement")
        );

        let _ = fs::remove_file(path);
    }

    #[test]
    fn saved_files_put_berths_before_placements() {
        let path = temp_path("ordering");
        let mut marina = marina();
        marina
            .assign(AssignRequest::new("berth-b02", BoatSize::L, "op1"))
            .expect("assign should succeed");

        save_marina(&path, &marina).expect("state should save");
        let lines: Vec<String> = fs::read_to_string(&path)
            .expect("state file should read")
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\"kind\":\"berth\""));
        assert!(lines[1].contains("\"kind\":\"berth\""));
        assert!(lines[2].contains("\"kind\":\"placement\""));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_rejects_duplicate_berth_bindings() {
        let path = temp_path("dup-binding");
        let mut marina = marina();
        marina
            .assign(AssignRequest::new("berth-b01", BoatSize::M, "op1"))
            .expect("assign should succeed");
        save_marina(&path, &marina).expect("state should save");

        // Append a second placement line for the same berth.
        let mut raw = fs::read_to_string(&path).expect("state file should read");
        let placement_line = raw
            .lines()
            .find(|line| line.contains("\"kind\":\"placement\""))
            .expect("placement line exists")
            .replace("plc-", "plc-dup-");
        raw.push_str(&placement_line);
        raw.push('\n');
        fs::write(&path, raw).expect("fixture should write");

        let err = load_marina(&path).expect_err("duplicate binding must be rejected");
        assert!(matches!(
            err,
            StateError::Ledger(LedgerError::BerthAlreadyBound { .. })
        ));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_rejects_nul_payload() {
        let path = temp_path("nul");
        fs::write(&path, b"{\"kind\":\"berth\"}\n\0garbage").expect("fixture should write");

        let err = load_marina(&path).expect_err("NUL payload must be rejected");
        assert!(matches!(err, StateError::Corrupt(message) if message.contains("NUL")));

        let _ = fs::remove_file(path);
    }
}
