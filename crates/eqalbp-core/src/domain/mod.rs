//! Problem facts and the mutable assignment.
//!
//! - [`Task`] and [`Equipment`] - input records handed over by a loader
//! - [`ProblemModel`] - dense, immutable arrays derived from the input
//! - [`AssignmentState`] - which station each task occupies, plus per-station aggregates

mod assignment;
mod facts;
mod model;


pub use assignment::AssignmentState;
pub use facts::{Equipment, Task};
pub use model::ProblemModel;

/// A set of task ids, stored in the same bitset representation as equipment types.
pub type TaskSet = crate::equipment::EquipmentSet;
