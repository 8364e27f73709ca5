//! EqALBP driver-side building blocks
//!
//! This crate provides what a local-search loop needs around the score
//! directors of `eqalbp-scoring`:
//! - [`StationWindowFilters`] - static move feasibility (equipment, station
//!   windows, independent swaps)
//! - Moves ([`ChangeMove`], [`SwapMove`]) that report their changes through
//!   the `on_unassign`/`on_assign` hooks and can be undone
//! - Move selectors with seeded random sampling
//! - [`LineSession`] - director, filters and RNG behind one interface
//! - [`run_workers`] - independent sessions in parallel
//!
//! The search loop itself (acceptance, termination) stays with the caller.

pub mod error;
pub mod heuristic;
pub mod session;
pub mod workers;

pub use error::FilterError;
pub use heuristic::{
    is_independent_pair, ChangeMove, ChangeMoveSelector, EquipmentFilter, Move, MoveSelector,
    StationWindowFilters, StationWindows, SwapMove, SwapMoveSelector,
};
pub use session::LineSession;
pub use workers::{derive_seeds, run_workers};
