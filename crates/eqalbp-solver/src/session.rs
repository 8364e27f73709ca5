//! Driver-facing session: one director, its filters and a seeded RNG.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use eqalbp_config::{EngineConfig, EnvironmentMode};
use eqalbp_core::{AssignmentState, HardMediumSoftScore, ProblemModel};
use eqalbp_scoring::{
    AnyScoreDirector, ScoreAggregates, ScoreDirector, ScoreDirectorFactory, ScoreError, ScorePhase,
};

use crate::error::FilterError;
use crate::heuristic::filter::{is_independent_pair, StationWindowFilters};
use crate::heuristic::r#move::{ChangeMove, Move, SwapMove};
use crate::heuristic::selector::{ChangeMoveSelector, MoveSelector, SwapMoveSelector};

/// Everything a search worker needs to evaluate moves on one assignment.
///
/// The model and filters are shared; the assignment, score aggregates and RNG
/// belong to this session alone. Use [`fork`](Self::fork) to give another
/// worker its own copy.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use eqalbp_config::EngineConfig;
/// use eqalbp_core::{Equipment, ProblemModel, Task};
/// use eqalbp_solver::LineSession;
///
/// let model = ProblemModel::new(
///     vec![
///         Task::new(0, 7).with_equipment([0]),
///         Task::new(1, 3).with_dependencies([0]),
///     ],
///     2,
///     vec![Equipment::pinned(0, 0, 0)],
/// )
/// .unwrap();
/// let mut session =
///     LineSession::initialize(Arc::new(model), &[None, None], EngineConfig::default()).unwrap();
///
/// assert!(session.is_feasible_move(0, 0));
/// assert!(!session.is_feasible_move(0, 1));
///
/// session.on_unassign(0);
/// session.on_assign(0, 0);
/// session.on_unassign(1);
/// session.on_assign(1, 1);
/// assert_eq!(session.score().to_string(), "0hard/-7medium/-58soft");
/// ```
#[derive(Debug, Clone)]
pub struct LineSession {
    director: AnyScoreDirector,
    filters: Option<Arc<StationWindowFilters>>,
    config: EngineConfig,
    rng: ChaCha8Rng,
}

impl LineSession {
    /// Builds a session from a per-task initial station list.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::StateMismatch`] if `initial` does not list every
    /// task and [`ScoreError::UnknownStation`] if it names a station out of
    /// range.
    pub fn initialize(
        model: Arc<ProblemModel>,
        initial: &[Option<usize>],
        config: EngineConfig,
    ) -> Result<Self, ScoreError> {
        if initial.len() != model.task_count() {
            return Err(ScoreError::StateMismatch {
                tasks: initial.len(),
                stations: model.station_count(),
                model_tasks: model.task_count(),
                model_stations: model.station_count(),
            });
        }
        if let Some(&station) = initial.iter().flatten().find(|&&s| s >= model.station_count()) {
            return Err(ScoreError::UnknownStation { station });
        }
        let state = AssignmentState::from_stations(&model, initial);
        Self::from_state(model, state, config)
    }

    /// Builds a session around an existing assignment.
    ///
    /// Models with movable equipment get full rescoring and no station
    /// filters; only the dependency check on swaps remains.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::StateMismatch`] if `state` was built for another
    /// model.
    pub fn from_state(
        model: Arc<ProblemModel>,
        state: AssignmentState,
        config: EngineConfig,
    ) -> Result<Self, ScoreError> {
        let filters = match StationWindowFilters::new(Arc::clone(&model)) {
            Ok(filters) => Some(Arc::new(filters)),
            Err(FilterError::MovableEquipment { movable }) => {
                debug!(
                    event = "filters_unavailable",
                    movable = movable.len(),
                    "station filters disabled"
                );
                None
            }
        };
        let mut director =
            ScoreDirectorFactory::new(config.clone()).build_score_director(model, state)?;
        let rng = session_rng(&config);

        info!(
            event = "session_initialized",
            incremental = director.is_incremental(),
            filtered = filters.is_some(),
            score = %director.score(),
        );
        Ok(Self {
            director,
            filters,
            config,
            rng,
        })
    }

    /// A copy of this session with its own assignment and an RNG seeded with
    /// `seed`. Model and filters stay shared.
    pub fn fork(&self, seed: u64) -> Self {
        debug!(event = "session_forked", seed);
        Self {
            director: self.director.clone(),
            filters: self.filters.clone(),
            config: self.config.clone(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Removes `task` from its station.
    ///
    /// # Panics
    ///
    /// Panics if `task` is unknown.
    pub fn on_unassign(&mut self, task: usize) {
        self.director.on_unassign(task);
    }

    /// Puts a task previously passed to [`on_unassign`](Self::on_unassign) on
    /// `station`.
    ///
    /// # Panics
    ///
    /// Panics on an unknown task or station, or without a preceding
    /// `on_unassign(task)`.
    pub fn on_assign(&mut self, task: usize, station: usize) {
        self.director.on_assign(task, station);
    }

    pub fn score(&mut self) -> HardMediumSoftScore {
        self.director.score()
    }

    /// Returns true if `task → station` passes the equipment and window
    /// filters.
    ///
    /// # Panics
    ///
    /// Panics if `task` is unknown.
    pub fn is_feasible_move(&self, task: usize, station: usize) -> bool {
        let model = self.director.model();
        assert!(task < model.task_count(), "unknown task {}", task);
        match &self.filters {
            Some(filters) => filters.is_feasible_move(task, station),
            None => station < model.station_count(),
        }
    }

    /// Returns true if the tasks are distinct and neither depends on the
    /// other.
    ///
    /// # Panics
    ///
    /// Panics if either task is unknown.
    pub fn is_feasible_swap(&self, left: usize, right: usize) -> bool {
        match &self.filters {
            Some(filters) => filters.is_feasible_swap(left, right),
            None => is_independent_pair(self.director.model(), left, right),
        }
    }

    /// Applies `m` and returns what [`undo_move`](Self::undo_move) needs.
    pub fn do_move<M: Move>(&mut self, m: &M) -> M::Undo {
        m.do_move(&mut self.director)
    }

    pub fn undo_move<M: Move>(&mut self, m: &M, undo: M::Undo) {
        m.undo_move(undo, &mut self.director);
    }

    /// A change-move selector over this session's filters.
    pub fn change_selector(&self) -> ChangeMoveSelector {
        ChangeMoveSelector::new(self.filters.clone())
    }

    /// A swap-move selector over this session's filters.
    pub fn swap_selector(&self) -> SwapMoveSelector {
        SwapMoveSelector::new(self.filters.clone())
    }

    /// Draws a random change move with the session RNG.
    pub fn random_change_move(&mut self, selector: &ChangeMoveSelector) -> Option<ChangeMove> {
        selector.random_move(&self.director, &mut self.rng)
    }

    /// Draws a random swap move with the session RNG.
    pub fn random_swap_move(&mut self, selector: &SwapMoveSelector) -> Option<SwapMove> {
        selector.random_move(&self.director, &mut self.rng)
    }

    pub fn model(&self) -> &ProblemModel {
        self.director.model()
    }

    pub fn state(&self) -> &AssignmentState {
        self.director.state()
    }

    pub fn phase(&self) -> ScorePhase {
        self.director.phase()
    }

    pub fn aggregates(&self) -> ScoreAggregates {
        self.director.aggregates()
    }

    pub fn director(&self) -> &AnyScoreDirector {
        &self.director
    }

    pub fn director_mut(&mut self) -> &mut AnyScoreDirector {
        &mut self.director
    }

    pub fn filters(&self) -> Option<&StationWindowFilters> {
        self.filters.as_deref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

/// Seeded from `random_seed`; without one, from entropy unless the
/// environment mode asks for reproducibility, in which case seed 0 is used.
fn session_rng(config: &EngineConfig) -> ChaCha8Rng {
    match (config.random_seed, config.environment_mode) {
        (Some(seed), _) => ChaCha8Rng::seed_from_u64(seed),
        (None, EnvironmentMode::NonReproducible) => ChaCha8Rng::seed_from_u64(rand::random()),
        (None, _) => ChaCha8Rng::seed_from_u64(0),
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
