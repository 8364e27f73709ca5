//! EqALBP Core - Core types for equipped assembly-line balancing
//!
//! This crate provides the static side of the problem and the one piece of
//! mutable planning data:
//! - Score types for representing solution quality
//! - [`EquipmentSet`], an immutable bitset over small id universes
//! - [`DependencyGraph`] utilities over the precedence DAG
//! - [`ProblemModel`] (immutable facts) and [`AssignmentState`] (task → station)

pub mod domain;
pub mod equipment;
pub mod error;
pub mod graph;
pub mod score;

pub use domain::{AssignmentState, Equipment, ProblemModel, Task};
pub use equipment::EquipmentSet;
pub use error::{GraphError, ModelError};
pub use graph::DependencyGraph;
pub use score::{HardMediumSoftScore, ScoreParseError};
