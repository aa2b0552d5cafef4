//! # moorings-engine
//!
//! Assignment engine and stores for marina berth occupancy.
//!
//! This crate provides:
//! - `BerthRegistry` and `PlacementLedger` (canonical in-memory state)
//! - `Marina` commands (assign, relocate, reserve, release, maintenance)
//! - read-only queries (occupancy, free-berth search, map snapshots)
//! - consistency audit and repair over the two stores
//! - JSONL read/write with lock-scoped atomic mutation
//! - TOML layout loading for marina bootstrap
//!
//! It intentionally does not render anything; presentation lives in the
//! CLI crate.
//!
//! ## Data model
//!
//! ```text
//! JSONL (on disk, berth + placement records)
//!     ↕  load / save under a lock guard
//! Marina = BerthRegistry + PlacementLedger (deterministic projection)
//! ```

pub mod atomic;
pub mod audit;
pub mod engine;
pub mod error;
pub mod jsonl;
pub mod layout;
pub mod ledger;
pub mod query;
pub mod registry;

pub use atomic::{AtomicStateMutationError, mutate_state_jsonl, state_lock_path};
pub use audit::{ConsistencyFinding, ConsistencyReport, check, failure_class, repair};
pub use engine::{AssignRequest, Marina, MetadataPatch, RepairAction};
pub use error::{CommandError, CommandErrorKind};
pub use jsonl::{StateError, StateRecord, load_marina, read_records, save_marina, write_records};
pub use layout::{LayoutError, load_layout, parse_layout};
pub use ledger::{LedgerError, PlacementLedger};
pub use query::{BerthView, MapSnapshot, PontoonOccupancy};
pub use registry::{BerthRegistry, RegistryError};
