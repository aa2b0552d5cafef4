//! Command error taxonomy.
//!
//! Every variant is recoverable by the caller; a failing command leaves
//! stored state unchanged. Storage failures are kept distinct from the
//! domain taxonomy.

use moorings_model::{BerthStatus, BoatSize, GeometryError};

/// Coarse classification of a command failure, for callers that map
/// errors onto transport responses or operator messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandErrorKind {
    /// Berth or placement id unknown.
    NotFound,
    /// Current state disallows the requested transition.
    PreconditionFailed,
    /// Malformed or inadmissible input.
    ValidationFailed,
    /// The placement would collide with a neighbor.
    ConflictDetected,
    /// Durable-store failure, not a domain condition.
    Storage,
}

/// Errors raised by assignment-engine commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("berth not found: {0}")]
    BerthNotFound(String),

    #[error("placement not found: {0}")]
    PlacementNotFound(String),

    #[error("berth {berth_id} is not free (status: {status})")]
    BerthNotFree {
        berth_id: String,
        status: BerthStatus,
    },

    #[error("berth {0} has no active placement")]
    NoActivePlacement(String),

    #[error("berth {0} has an active placement")]
    BerthOccupied(String),

    #[error("size {requested} exceeds berth {berth_id} admissible size ({admissible})")]
    SizeMismatch {
        berth_id: String,
        requested: BoatSize,
        /// Size token, or "none" when even xs overflows the footprint.
        admissible: String,
    },

    #[error("placement {placement_id} would overlap placement {other_id}")]
    SpatialConflict {
        placement_id: String,
        other_id: String,
    },

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("storage error: {0}")]
    Storage(String),
}

impl CommandError {
    pub fn kind(&self) -> CommandErrorKind {
        match self {
            CommandError::BerthNotFound(_) | CommandError::PlacementNotFound(_) => {
                CommandErrorKind::NotFound
            }
            CommandError::BerthNotFree { .. }
            | CommandError::NoActivePlacement(_)
            | CommandError::BerthOccupied(_) => CommandErrorKind::PreconditionFailed,
            CommandError::SizeMismatch { .. } | CommandError::Geometry(_) => {
                CommandErrorKind::ValidationFailed
            }
            CommandError::SpatialConflict { .. } => CommandErrorKind::ConflictDetected,
            CommandError::Storage(_) => CommandErrorKind::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_classify_into_the_taxonomy() {
        assert_eq!(
            CommandError::BerthNotFound("berth-1".to_string()).kind(),
            CommandErrorKind::NotFound
        );
        assert_eq!(
            CommandError::BerthNotFree {
                berth_id: "berth-1".to_string(),
                status: BerthStatus::Occupied,
            }
            .kind(),
            CommandErrorKind::PreconditionFailed
        );
        assert_eq!(
            CommandError::SizeMismatch {
                berth_id: "berth-1".to_string(),
                requested: BoatSize::Xl,
                admissible: "m".to_string(),
            }
            .kind(),
            CommandErrorKind::ValidationFailed
        );
        assert_eq!(
            CommandError::SpatialConflict {
                placement_id: "plc-1".to_string(),
                other_id: "plc-2".to_string(),
            }
            .kind(),
            CommandErrorKind::ConflictDetected
        );
        assert_eq!(
            CommandError::Storage("disk gone".to_string()).kind(),
            CommandErrorKind::Storage
        );
    }
}
