//! Heuristic building blocks for a local-search driver.
//!
//! - [`filter`] - static feasibility predicates
//! - [`r#move`] - change and swap moves with undo
//! - [`selector`] - candidate move enumeration and random sampling

pub mod filter;
pub mod r#move;
pub mod selector;

pub use filter::{is_independent_pair, EquipmentFilter, StationWindowFilters, StationWindows};
pub use r#move::{ChangeMove, Move, SwapMove};
pub use selector::{ChangeMoveSelector, MoveSelector, SwapMoveSelector};
