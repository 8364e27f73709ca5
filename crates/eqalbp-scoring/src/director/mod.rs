//! Score director implementations.
//!
//! A score director owns the working [`AssignmentState`] and answers score
//! queries for it.
//!
//! # Score Director Types
//!
//! - [`ScoreEngine`] - Incremental scoring for pinned equipment
//! - [`SimpleScoreDirector`] - Full recalculation (baseline, movable equipment)
//! - [`AnyScoreDirector`] - Whichever of the two [`ScoreDirectorFactory`] chose
//!
//! [`AssignmentState`]: eqalbp_core::AssignmentState

mod engine;
mod factory;
mod hooks;
mod simple;
mod traits;

#[cfg(test)]
mod tests;

pub use engine::ScoreEngine;
pub use factory::{AnyScoreDirector, ScoreDirectorFactory};
pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;

use eqalbp_core::{AssignmentState, ProblemModel};

use crate::error::ScoreError;

/// Rejects an assignment built for a model of another shape.
pub(crate) fn check_state(model: &ProblemModel, state: &AssignmentState) -> Result<(), ScoreError> {
    if state.task_count() != model.task_count() || state.station_count() != model.station_count() {
        return Err(ScoreError::StateMismatch {
            tasks: state.task_count(),
            stations: state.station_count(),
            model_tasks: model.task_count(),
            model_stations: model.station_count(),
        });
    }
    Ok(())
}
