//! Incremental scoring for equipped assembly-line balancing.
//!
//! This crate provides:
//! - [`calculate_aggregates`], the from-scratch definition of every score term
//! - [`ScoreEngine`], which keeps those terms up to date in time proportional
//!   to the degree of the moved task
//! - [`SimpleScoreDirector`], full recalculation for models whose equipment
//!   can move
//! - [`ScoreDirectorFactory`], which picks between the two
//!
//! # Architecture
//!
//! A search driver owns one director per worker and reports every
//! reassignment as an `on_unassign(task)` / `on_assign(task, station)` pair.
//! The director applies the change to its [`AssignmentState`] and updates its
//! cached terms; `score()` then reads them.
//!
//! [`AssignmentState`]: eqalbp_core::AssignmentState

pub mod calculation;
pub mod director;
pub mod error;

pub use calculation::{
    calculate_aggregates, calculate_aggregates_with, count_dependency_inversions, ScoreAggregates,
    ScorePhase, ScoreRules,
};
pub use director::{
    AnyScoreDirector, ScoreDirector, ScoreDirectorFactory, ScoreEngine, SimpleScoreDirector,
};
pub use error::ScoreError;
