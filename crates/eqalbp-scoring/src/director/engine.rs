//! Incremental score engine.
//!
//! [`ScoreEngine`] keeps every [`ScoreAggregates`] term in step with the
//! working assignment. Each hook retracts the terms touched by the moved task,
//! applies the change, then inserts the new terms, so an update costs
//! `O(degree(task) + |equipment(task)|)` plus `O(S)` when the busiest station
//! gets lighter.

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{error, info, trace};

use eqalbp_config::{EngineConfig, EnvironmentMode};
use eqalbp_core::{AssignmentState, HardMediumSoftScore, ProblemModel};

use super::hooks::{check_station, check_task, PendingHooks};
use super::{check_state, ScoreDirector};
use crate::calculation::{
    calculate_aggregates, missing_equipment, unused_equipment, ScoreAggregates, ScorePhase,
    ScoreRules,
};
use crate::error::ScoreError;

/// Incremental score director for pure Type-2 models.
///
/// Station equipment is read from the model once and assumed fixed, so the
/// engine refuses models with movable equipment.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use eqalbp_config::EngineConfig;
/// use eqalbp_core::{AssignmentState, Equipment, HardMediumSoftScore, ProblemModel, Task};
/// use eqalbp_scoring::{ScoreDirector, ScoreEngine};
///
/// let model = Arc::new(
///     ProblemModel::new(
///         vec![Task::new(0, 4), Task::new(1, 6).with_dependencies([0])],
///         2,
///         vec![Equipment::pinned(0, 0, 1)],
///     )
///     .unwrap(),
/// );
/// let state = AssignmentState::new(&model);
/// let mut engine = ScoreEngine::new(model, state, &EngineConfig::default()).unwrap();
///
/// engine.on_unassign(1);
/// engine.on_assign(1, 0);
/// // Task 1 is assigned while its dependency is not
/// assert_eq!(engine.score().hard(), -1);
///
/// engine.on_unassign(0);
/// engine.on_assign(0, 0);
/// // Both on station 0: strictly-before is violated
/// assert_eq!(engine.score().hard(), -1);
///
/// engine.on_unassign(1);
/// engine.on_assign(1, 1);
/// assert_eq!(engine.score(), HardMediumSoftScore::of(0, -6, -52));
/// ```
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    model: Arc<ProblemModel>,
    state: AssignmentState,
    rules: ScoreRules,
    mode: EnvironmentMode,
    phase: ScorePhase,
    aggregates: ScoreAggregates,
    pending: PendingHooks,
}

/// Per-station terms, retracted before and inserted after a change.
#[derive(Debug, Clone, Copy)]
struct StationTerms {
    excess_load: u64,
    squared_loads: u64,
    unused_equipment: u64,
}

impl ScoreEngine {
    /// Creates an engine and computes the initial aggregates from `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::NotPureType2`] if any equipment is movable and
    /// [`ScoreError::StateMismatch`] if `state` was built for another model.
    pub fn new(
        model: Arc<ProblemModel>,
        state: AssignmentState,
        config: &EngineConfig,
    ) -> Result<Self, ScoreError> {
        if !model.is_pure_type2() {
            return Err(ScoreError::NotPureType2 {
                movable: model.movable_equipment(),
            });
        }
        check_state(&model, &state)?;

        let rules = ScoreRules::new(&model, config);
        let pending = PendingHooks::new(model.task_count());
        let mut engine = Self {
            model,
            state,
            rules,
            mode: config.environment_mode,
            phase: ScorePhase::Construction,
            aggregates: ScoreAggregates::default(),
            pending,
        };
        engine.reset_from_scratch();
        Ok(engine)
    }

    /// Replaces the working assignment and recomputes every aggregate.
    ///
    /// Pending `on_unassign` calls are discarded. A latched local-search
    /// phase is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::StateMismatch`] if `state` was built for another
    /// model.
    pub fn reset_with(&mut self, state: AssignmentState) -> Result<(), ScoreError> {
        check_state(&self.model, &state)?;
        self.state = state;
        self.pending.clear();
        self.reset_from_scratch();
        Ok(())
    }

    /// The shared model.
    pub fn shared_model(&self) -> &Arc<ProblemModel> {
        &self.model
    }

    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.mode
    }

    /// Dependency edges incident to `task` that are currently violated.
    ///
    /// An edge `p → d` is violated when `d` is assigned and `p` is unassigned
    /// or not ordered before `d`. Both directions are counted, so the result
    /// only depends on where `task` and its neighbours sit.
    fn task_inversions(&self, task: usize) -> u64 {
        let station = self.state.station_of(task);
        let inversion = self.rules.inversion;
        let mut count = 0;

        if let Some(s) = station {
            for &dependency in self.model.dependencies(task) {
                match self.state.station_of(dependency) {
                    Some(ds) if inversion.is_ordered(ds, s) => {}
                    _ => count += 1,
                }
            }
        }
        for &successor in self.model.successors(task) {
            if let Some(ss) = self.state.station_of(successor) {
                match station {
                    Some(s) if inversion.is_ordered(s, ss) => {}
                    _ => count += 1,
                }
            }
        }
        count
    }

    fn task_missing(&self, task: usize) -> u64 {
        self.state.station_of(task).map_or(0, |s| {
            missing_equipment(
                self.model.required_equipment(task),
                self.model.installed_equipment(s),
            )
        })
    }

    fn station_terms(&self, station: usize) -> StationTerms {
        let load = self.state.load(station);
        StationTerms {
            excess_load: self.rules.station_excess(load),
            squared_loads: load * load,
            unused_equipment: unused_equipment(
                self.model.installed_equipment(station),
                self.state.needed_equipment(station),
            ),
        }
    }

    fn retract_station(&mut self, terms: StationTerms) {
        self.aggregates.excess_load -= terms.excess_load;
        self.aggregates.squared_loads -= terms.squared_loads;
        self.aggregates.unused_equipment -= terms.unused_equipment;
    }

    fn insert_station(&mut self, terms: StationTerms) {
        self.aggregates.excess_load += terms.excess_load;
        self.aggregates.squared_loads += terms.squared_loads;
        self.aggregates.unused_equipment += terms.unused_equipment;
    }

    /// Moves `task` to `to`, updating the aggregates by retract → change →
    /// insert over the task's edges and the stations it leaves and enters.
    fn reassign(&mut self, task: usize, to: Option<usize>) {
        let from = self.state.station_of(task);
        if from == to {
            return;
        }
        match (from, to) {
            (None, Some(_)) => self.aggregates.unassigned_tasks -= 1,
            (Some(_), None) => self.aggregates.unassigned_tasks += 1,
            _ => {}
        }
        let touched: SmallVec<[usize; 2]> = from.into_iter().chain(to).collect();

        self.aggregates.dependency_inversions -= self.task_inversions(task);
        self.aggregates.missing_equipment -= self.task_missing(task);
        let mut old_loads: SmallVec<[u64; 2]> = SmallVec::new();
        for &station in &touched {
            let terms = self.station_terms(station);
            self.retract_station(terms);
            old_loads.push(self.state.load(station));
        }

        self.state.assign(&self.model, task, to);

        self.aggregates.dependency_inversions += self.task_inversions(task);
        self.aggregates.missing_equipment += self.task_missing(task);
        for &station in &touched {
            let terms = self.station_terms(station);
            self.insert_station(terms);
        }
        self.update_cycle_time(&touched, &old_loads);
    }

    fn update_cycle_time(&mut self, touched: &[usize], old_loads: &[u64]) {
        let mut rescan = false;
        for (&station, &old) in touched.iter().zip(old_loads) {
            let new = self.state.load(station);
            if new >= old {
                self.aggregates.cycle_time = self.aggregates.cycle_time.max(new);
            } else if old == self.aggregates.cycle_time {
                rescan = true;
            }
        }
        if rescan {
            self.aggregates.cycle_time = self.state.loads().iter().copied().max().unwrap_or(0);
        }
    }

    fn latch_phase(&mut self) {
        if self.phase == ScorePhase::Construction && self.state.is_complete() {
            self.phase = ScorePhase::LocalSearch;
            info!(
                event = "phase_transition",
                from = "construction",
                to = "local_search",
                cycle_time = self.aggregates.cycle_time,
            );
        }
    }

    /// Compares the cached aggregates with a full recalculation.
    ///
    /// # Panics
    ///
    /// Panics on any difference.
    fn assert_consistent(&self, context: &str) {
        let expected = calculate_aggregates(&self.model, &self.state, &self.rules);
        if expected != self.aggregates {
            error!(
                event = "score_corruption",
                context,
                incremental = ?self.aggregates,
                from_scratch = ?expected,
            );
            panic!(
                "Score corruption after {}: incremental {:?} != from scratch {:?}",
                context, self.aggregates, expected
            );
        }
    }
}

impl ScoreDirector for ScoreEngine {
    fn model(&self) -> &ProblemModel {
        &self.model
    }

    fn state(&self) -> &AssignmentState {
        &self.state
    }

    fn on_unassign(&mut self, task: usize) {
        check_task("on_unassign", &self.state, task);
        self.pending.unassigned(task);
        self.reassign(task, None);
        trace!(event = "on_unassign", task, aggregates = ?self.aggregates);
        if self.mode == EnvironmentMode::FullAssert {
            self.assert_consistent("on_unassign");
        }
    }

    fn on_assign(&mut self, task: usize, station: usize) {
        check_task("on_assign", &self.state, task);
        check_station("on_assign", &self.state, station);
        self.pending.assigned(task);
        debug_assert!(self.state.station_of(task).is_none());
        self.reassign(task, Some(station));
        self.latch_phase();
        trace!(event = "on_assign", task, station, aggregates = ?self.aggregates);
        if self.mode == EnvironmentMode::FullAssert {
            self.assert_consistent("on_assign");
        }
    }

    fn score(&mut self) -> HardMediumSoftScore {
        if self.mode == EnvironmentMode::FastAssert {
            self.assert_consistent("score");
        }
        self.rules.score(&self.aggregates, self.phase)
    }

    fn aggregates(&self) -> ScoreAggregates {
        self.aggregates
    }

    fn phase(&self) -> ScorePhase {
        self.phase
    }

    fn reset_from_scratch(&mut self) {
        self.aggregates = calculate_aggregates(&self.model, &self.state, &self.rules);
        self.latch_phase();
        let score = self.rules.score(&self.aggregates, self.phase);
        info!(
            event = "score_reset",
            assigned = self.state.assigned_count(),
            phase = ?self.phase,
            score = %score,
        );
    }

    fn is_incremental(&self) -> bool {
        true
    }
}
