//! Simple score director with full recalculation.

use std::sync::Arc;

use tracing::{debug, trace};

use eqalbp_config::EngineConfig;
use eqalbp_core::{AssignmentState, EquipmentSet, HardMediumSoftScore, ProblemModel};

use super::hooks::{check_station, check_task, PendingHooks};
use super::{check_state, ScoreDirector};
use crate::calculation::{calculate_aggregates_with, ScoreAggregates, ScorePhase, ScoreRules};
use crate::error::ScoreError;

/// A score director that recalculates every aggregate after a change.
///
/// Works for any model, including ones whose equipment may be relocated with
/// [`relocate_equipment`](Self::relocate_equipment). Inefficient but correct;
/// used when [`ScoreEngine`](super::ScoreEngine) cannot be.
#[derive(Debug, Clone)]
pub struct SimpleScoreDirector {
    model: Arc<ProblemModel>,
    state: AssignmentState,
    rules: ScoreRules,
    phase: ScorePhase,
    /// Station of every equipment instance.
    placement: Vec<Option<usize>>,
    installed: Vec<EquipmentSet>,
    pending: PendingHooks,
    score_dirty: bool,
    cached: ScoreAggregates,
}

impl SimpleScoreDirector {
    /// Creates a director with equipment placed as in the model.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::StateMismatch`] if `state` was built for another
    /// model.
    pub fn new(
        model: Arc<ProblemModel>,
        state: AssignmentState,
        config: &EngineConfig,
    ) -> Result<Self, ScoreError> {
        check_state(&model, &state)?;
        let rules = ScoreRules::new(&model, config);
        let pending = PendingHooks::new(model.task_count());
        let placement = model.equipment().iter().map(|e| e.installed_station).collect();
        let installed = (0..model.station_count())
            .map(|s| model.installed_equipment(s).clone())
            .collect();
        let mut director = Self {
            model,
            state,
            rules,
            phase: ScorePhase::Construction,
            placement,
            installed,
            pending,
            score_dirty: true,
            cached: ScoreAggregates::default(),
        };
        director.latch_phase();
        Ok(director)
    }

    /// Moves a movable equipment instance to `station`, or removes it from
    /// the line with `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the instance is unknown or pinned, or the station
    /// is out of range.
    pub fn relocate_equipment(
        &mut self,
        equipment: usize,
        station: Option<usize>,
    ) -> Result<(), ScoreError> {
        let instance = self
            .model
            .equipment()
            .get(equipment)
            .ok_or(ScoreError::UnknownEquipment { equipment })?;
        if instance.pinned {
            return Err(ScoreError::PinnedEquipment { equipment });
        }
        if let Some(s) = station {
            if s >= self.model.station_count() {
                return Err(ScoreError::UnknownStation { station: s });
            }
        }
        if self.placement[equipment] == station {
            return Ok(());
        }

        debug!(
            event = "equipment_relocated",
            equipment,
            from = ?self.placement[equipment],
            to = ?station,
        );
        self.placement[equipment] = station;
        self.rebuild_installed();
        self.score_dirty = true;
        Ok(())
    }

    /// Station of equipment instance `equipment`.
    pub fn equipment_station(&self, equipment: usize) -> Option<usize> {
        self.placement[equipment]
    }

    /// Equipment types currently installed at `station`.
    pub fn installed_equipment(&self, station: usize) -> &EquipmentSet {
        &self.installed[station]
    }

    fn rebuild_installed(&mut self) {
        for set in &mut self.installed {
            *set = EquipmentSet::new();
        }
        for (instance, station) in self.model.equipment().iter().zip(&self.placement) {
            if let Some(s) = *station {
                self.installed[s] = self.installed[s].with(instance.equipment_type);
            }
        }
    }

    fn calculate(&self) -> ScoreAggregates {
        let installed: Vec<&EquipmentSet> = self.installed.iter().collect();
        calculate_aggregates_with(&self.model, &self.state, &self.rules, &installed)
    }

    fn latch_phase(&mut self) {
        if self.phase == ScorePhase::Construction && self.state.is_complete() {
            self.phase = ScorePhase::LocalSearch;
            debug!(event = "phase_transition", from = "construction", to = "local_search");
        }
    }
}

impl ScoreDirector for SimpleScoreDirector {
    fn model(&self) -> &ProblemModel {
        &self.model
    }

    fn state(&self) -> &AssignmentState {
        &self.state
    }

    fn on_unassign(&mut self, task: usize) {
        check_task("on_unassign", &self.state, task);
        self.pending.unassigned(task);
        self.state.assign(&self.model, task, None);
        self.score_dirty = true;
        trace!(event = "on_unassign", task);
    }

    fn on_assign(&mut self, task: usize, station: usize) {
        check_task("on_assign", &self.state, task);
        check_station("on_assign", &self.state, station);
        self.pending.assigned(task);
        self.state.assign(&self.model, task, Some(station));
        self.score_dirty = true;
        self.latch_phase();
        trace!(event = "on_assign", task, station);
    }

    fn score(&mut self) -> HardMediumSoftScore {
        if self.score_dirty {
            self.cached = self.calculate();
            self.score_dirty = false;
        }
        self.rules.score(&self.cached, self.phase)
    }

    fn aggregates(&self) -> ScoreAggregates {
        if self.score_dirty {
            self.calculate()
        } else {
            self.cached
        }
    }

    fn phase(&self) -> ScorePhase {
        self.phase
    }

    fn reset_from_scratch(&mut self) {
        self.cached = self.calculate();
        self.score_dirty = false;
        self.latch_phase();
    }
}
