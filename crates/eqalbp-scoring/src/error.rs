//! Scoring errors.

use thiserror::Error;

/// Error raised when a score director cannot be built or used as requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The model has movable equipment, so cached station equipment could go
    /// stale. Use full rescoring instead.
    #[error("incremental scoring requires pinned equipment; movable equipment: {movable:?}")]
    NotPureType2 { movable: Vec<usize> },

    /// The assignment was built for a different model.
    #[error("assignment covers {tasks} tasks on {stations} stations, model has {model_tasks} tasks on {model_stations} stations")]
    StateMismatch {
        tasks: usize,
        stations: usize,
        model_tasks: usize,
        model_stations: usize,
    },

    #[error("unknown equipment {equipment}")]
    UnknownEquipment { equipment: usize },

    #[error("equipment {equipment} is pinned and cannot be relocated")]
    PinnedEquipment { equipment: usize },

    #[error("station {station} is out of range")]
    UnknownStation { station: usize },
}
