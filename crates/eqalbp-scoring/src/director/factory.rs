//! Score director factory for creating score directors.

use std::sync::Arc;

use tracing::debug;

use eqalbp_config::EngineConfig;
use eqalbp_core::{AssignmentState, HardMediumSoftScore, ProblemModel};

use super::{ScoreDirector, ScoreEngine, SimpleScoreDirector};
use crate::calculation::{ScoreAggregates, ScorePhase};
use crate::error::ScoreError;

/// Factory for creating score directors.
///
/// Builds a [`ScoreEngine`] when the model's equipment is all pinned and a
/// [`SimpleScoreDirector`] otherwise.
#[derive(Debug, Clone, Default)]
pub struct ScoreDirectorFactory {
    config: EngineConfig,
}

impl ScoreDirectorFactory {
    /// Creates a new ScoreDirectorFactory.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Creates a score director for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::StateMismatch`] if `state` was built for another
    /// model.
    pub fn build_score_director(
        &self,
        model: Arc<ProblemModel>,
        state: AssignmentState,
    ) -> Result<AnyScoreDirector, ScoreError> {
        if model.is_pure_type2() {
            return ScoreEngine::new(model, state, &self.config).map(AnyScoreDirector::Incremental);
        }
        debug!(
            event = "incremental_unavailable",
            movable = model.movable_equipment().len(),
            "falling back to full rescoring"
        );
        SimpleScoreDirector::new(model, state, &self.config).map(AnyScoreDirector::Simple)
    }
}

/// Either kind of score director, as chosen by [`ScoreDirectorFactory`].
#[derive(Debug, Clone)]
pub enum AnyScoreDirector {
    Incremental(ScoreEngine),
    Simple(SimpleScoreDirector),
}

impl AnyScoreDirector {
    pub fn as_incremental(&self) -> Option<&ScoreEngine> {
        match self {
            AnyScoreDirector::Incremental(engine) => Some(engine),
            AnyScoreDirector::Simple(_) => None,
        }
    }

    /// The full-recalculation director, for equipment relocation.
    pub fn as_simple_mut(&mut self) -> Option<&mut SimpleScoreDirector> {
        match self {
            AnyScoreDirector::Incremental(_) => None,
            AnyScoreDirector::Simple(director) => Some(director),
        }
    }

    fn inner(&self) -> &dyn ScoreDirector {
        match self {
            AnyScoreDirector::Incremental(engine) => engine,
            AnyScoreDirector::Simple(director) => director,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ScoreDirector {
        match self {
            AnyScoreDirector::Incremental(engine) => engine,
            AnyScoreDirector::Simple(director) => director,
        }
    }
}

impl ScoreDirector for AnyScoreDirector {
    fn model(&self) -> &ProblemModel {
        self.inner().model()
    }

    fn state(&self) -> &AssignmentState {
        self.inner().state()
    }

    #[inline]
    fn on_unassign(&mut self, task: usize) {
        self.inner_mut().on_unassign(task)
    }

    #[inline]
    fn on_assign(&mut self, task: usize, station: usize) {
        self.inner_mut().on_assign(task, station)
    }

    fn score(&mut self) -> HardMediumSoftScore {
        self.inner_mut().score()
    }

    fn aggregates(&self) -> ScoreAggregates {
        self.inner().aggregates()
    }

    fn phase(&self) -> ScorePhase {
        self.inner().phase()
    }

    fn reset_from_scratch(&mut self) {
        self.inner_mut().reset_from_scratch()
    }

    fn is_incremental(&self) -> bool {
        self.inner().is_incremental()
    }
}
