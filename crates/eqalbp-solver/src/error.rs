//! Filter errors.

use thiserror::Error;

/// Error raised when move filters cannot be precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Station equipment is not fixed, so compatibility and windows cannot be
    /// cached.
    #[error("move filters require pinned equipment; movable equipment: {movable:?}")]
    MovableEquipment { movable: Vec<usize> },
}
