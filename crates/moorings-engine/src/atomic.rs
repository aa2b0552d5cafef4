//! Lock-scoped atomic mutation helpers for the JSONL marina state.
//!
//! Commands run load → mutate → save under a lock-file guard, so two
//! processes racing on the same state file see one success and one
//! `LockBusy` rejection, never an interleaved write.

use crate::engine::Marina;
use crate::jsonl::{self, StateError};
use chrono::Utc;
use std::error::Error as StdError;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn state_lock_path(state_path: &Path) -> PathBuf {
    let mut path: OsString = state_path.as_os_str().to_os_string();
    path.push(".lock");
    PathBuf::from(path)
}

#[derive(Debug)]
pub enum AtomicStateMutationError<E> {
    LockBusy { lock_path: String },
    LockIo { lock_path: String, message: String },
    State(StateError),
    Mutation(E),
}

impl<E> AtomicStateMutationError<E> {
    fn lock_busy(lock_path: &Path) -> Self {
        Self::LockBusy {
            lock_path: lock_path.display().to_string(),
        }
    }

    fn lock_io(lock_path: &Path, message: impl Into<String>) -> Self {
        Self::LockIo {
            lock_path: lock_path.display().to_string(),
            message: message.into(),
        }
    }
}

impl<E: Display> Display for AtomicStateMutationError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LockBusy { lock_path } => write!(f, "marina state lock busy: {lock_path}"),
            Self::LockIo { lock_path, message } => {
                write!(f, "failed to acquire marina state lock {lock_path}: {message}")
            }
            Self::State(err) => write!(f, "{err}"),
            Self::Mutation(err) => write!(f, "{err}"),
        }
    }
}

impl<E> StdError for AtomicStateMutationError<E> where
    E: Display + std::fmt::Debug + StdError + 'static
{
}

/// Execute one lock-scoped mutation against a marina state path.
///
/// The mutator returns `(value, changed)` where:
/// - `value` is returned to the caller
/// - `changed=true` persists the state to JSONL before lock release.
///
/// A failed mutation leaves the file untouched: nothing is written
/// unless the mutator returns `Ok` with `changed=true`.
pub fn mutate_state_jsonl<T, E, F>(
    path: impl AsRef<Path>,
    mutator: F,
) -> Result<T, AtomicStateMutationError<E>>
where
    F: FnOnce(&mut Marina) -> Result<(T, bool), E>,
{
    let path = path.as_ref();
    let _guard = StateFileLockGuard::acquire(path).map_err(|err| match err {
        AtomicStateMutationError::LockBusy { lock_path } => {
            AtomicStateMutationError::LockBusy { lock_path }
        }
        AtomicStateMutationError::LockIo { lock_path, message } => {
            AtomicStateMutationError::LockIo { lock_path, message }
        }
        AtomicStateMutationError::State(source) => AtomicStateMutationError::State(source),
        AtomicStateMutationError::Mutation(unreachable) => match unreachable {},
    })?;

    let mut marina = jsonl::load_marina(path).map_err(AtomicStateMutationError::State)?;
    let (value, changed) = mutator(&mut marina).map_err(AtomicStateMutationError::Mutation)?;
    if changed {
        jsonl::save_marina(path, &marina).map_err(AtomicStateMutationError::State)?;
    }
    Ok(value)
}

struct StateFileLockGuard {
    lock_path: PathBuf,
    _file: File,
}

impl StateFileLockGuard {
    fn acquire(path: &Path) -> Result<Self, AtomicStateMutationError<std::convert::Infallible>> {
        let lock_path = state_lock_path(path);
        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| AtomicStateMutationError::lock_io(&lock_path, e.to_string()))?;
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(mut file) => {
                let _ = writeln!(
                    file,
                    "pid={}\nutc={}",
                    std::process::id(),
                    Utc::now().to_rfc3339()
                );
                Ok(Self {
                    lock_path,
                    _file: file,
                })
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(AtomicStateMutationError::lock_busy(&lock_path))
            }
            Err(err) => Err(AtomicStateMutationError::lock_io(
                &lock_path,
                err.to_string(),
            )),
        }
    }
}

impl Drop for StateFileLockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AssignRequest;
    use crate::error::CommandError;
    use crate::ledger::PlacementLedger;
    use crate::registry::BerthRegistry;
    use moorings_model::{Berth, BerthStatus, BoatSize, Envelope, GeoPoint};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_state(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "moorings-atomic-{prefix}-{}-{unique}.jsonl",
            std::process::id()
        ))
    }

    fn seed_state(path: &Path) {
        let registry = BerthRegistry::from_berths(vec![Berth::new(
            "berth-b01",
            "B-01",
            "B",
            GeoPoint::new(43.27, 5.35),
            Envelope::new(4.0, 11.0),
        )])
        .expect("registry should build");
        let marina = Marina::from_parts(registry, PlacementLedger::default());
        jsonl::save_marina(path, &marina).expect("seed state should save");
    }

    #[test]
    fn mutation_persists_when_changed() {
        let path = temp_state("persist");
        seed_state(&path);

        let placement = mutate_state_jsonl(&path, |marina: &mut Marina| {
            let placement = marina.assign(AssignRequest::new("berth-b01", BoatSize::M, "op1"))?;
            Ok::<_, CommandError>((placement, true))
        })
        .expect("mutation should commit");

        let reloaded = jsonl::load_marina(&path).expect("state should reload");
        assert_eq!(
            reloaded.registry().get("berth-b01").expect("berth").status,
            BerthStatus::Occupied
        );
        assert!(reloaded.ledger().get(&placement.id).is_some());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn failed_mutation_leaves_state_untouched() {
        let path = temp_state("rollback");
        seed_state(&path);
        let before = fs::read_to_string(&path).expect("state file should read");

        let err = mutate_state_jsonl(&path, |marina: &mut Marina| {
            marina
                .assign(AssignRequest::new("berth-b01", BoatSize::Xl, "op1"))
                .map(|placement| (placement, true))
        })
        .expect_err("oversized assignment must fail");
        assert!(matches!(
            err,
            AtomicStateMutationError::Mutation(CommandError::SizeMismatch { .. })
        ));

        let after = fs::read_to_string(&path).expect("state file should read");
        assert_eq!(before, after);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn held_lock_rejects_concurrent_mutation() {
        let path = temp_state("lock-busy");
        seed_state(&path);

        let lock_path = state_lock_path(&path);
        fs::write(&lock_path, "pid=0\n").expect("lock fixture should write");

        let err = mutate_state_jsonl(&path, |_: &mut Marina| {
            Ok::<_, CommandError>(((), false))
        })
        .expect_err("held lock must reject the mutation");
        assert!(matches!(err, AtomicStateMutationError::LockBusy { .. }));

        let _ = fs::remove_file(&lock_path);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn lock_is_released_after_mutation() {
        let path = temp_state("lock-release");
        seed_state(&path);

        mutate_state_jsonl(&path, |_: &mut Marina| Ok::<_, CommandError>(((), false)))
            .expect("read-only mutation should succeed");
        assert!(!state_lock_path(&path).exists());

        let _ = fs::remove_file(path);
    }
}
