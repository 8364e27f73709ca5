//! From-scratch score calculation.
//!
//! [`calculate_aggregates`] is the definition of every score term. The
//! incremental [`ScoreEngine`](crate::ScoreEngine) must always agree with it.

use eqalbp_config::{ConstructionScore, EngineConfig, InversionSemantics};
use eqalbp_core::{AssignmentState, EquipmentSet, HardMediumSoftScore, ProblemModel};

/// Which objective the medium and soft levels carry.
///
/// A solve starts in `Construction` and switches to `LocalSearch` once every
/// task has a station. The switch happens once and is never undone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScorePhase {
    #[default]
    Construction,
    LocalSearch,
}

/// Running totals behind a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScoreAggregates {
    /// Dependency edges whose dependency is unassigned or not before its
    /// assigned dependent.
    pub dependency_inversions: u64,
    /// Required equipment types missing at the station of an assigned task,
    /// summed over tasks.
    pub missing_equipment: u64,
    /// Largest station load.
    pub cycle_time: u64,
    /// Sum over stations of `max(0, load - load_limit)`.
    pub excess_load: u64,
    /// Sum over stations of `load²`.
    pub squared_loads: u64,
    /// Installed equipment types no assigned task at that station needs,
    /// summed over stations.
    pub unused_equipment: u64,
    /// Tasks without a station.
    pub unassigned_tasks: u64,
}

impl ScoreAggregates {
    /// Total hard violations.
    pub fn hard_violations(&self) -> u64 {
        self.dependency_inversions + self.missing_equipment
    }
}

/// Config-derived constants shared by every director.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    pub inversion: InversionSemantics,
    pub construction_score: ConstructionScore,
    /// Station load above which load counts as excess.
    pub load_limit: u64,
}

impl ScoreRules {
    pub fn new(model: &ProblemModel, config: &EngineConfig) -> Self {
        Self {
            inversion: config.inversion,
            construction_score: config.construction_score,
            load_limit: config.load_limit(model.lower_bound_cycle_time()),
        }
    }

    #[inline]
    pub fn station_excess(&self, load: u64) -> u64 {
        load.saturating_sub(self.load_limit)
    }

    /// Maps aggregates to a score for the given phase.
    ///
    /// - hard: `-(dependency_inversions + missing_equipment)`
    /// - construction: medium `-excess_load` (or `-(cycle_time - limit)⁺`),
    ///   soft `-(unused_equipment + unassigned_tasks)`
    /// - local search: medium `-cycle_time`, soft `-Σ load²`
    pub fn score(&self, aggregates: &ScoreAggregates, phase: ScorePhase) -> HardMediumSoftScore {
        let hard = -(aggregates.hard_violations() as i64);
        match phase {
            ScorePhase::Construction => {
                let medium = match self.construction_score {
                    ConstructionScore::ExcessLoad => aggregates.excess_load,
                    ConstructionScore::CycleTimeDiff => self.station_excess(aggregates.cycle_time),
                };
                let soft = aggregates.unused_equipment + aggregates.unassigned_tasks;
                HardMediumSoftScore::of(hard, -(medium as i64), -(soft as i64))
            }
            ScorePhase::LocalSearch => HardMediumSoftScore::of(
                hard,
                -(aggregates.cycle_time as i64),
                -(aggregates.squared_loads as i64),
            ),
        }
    }
}

/// Computes every aggregate from scratch, using the equipment installed in
/// the model.
pub fn calculate_aggregates(
    model: &ProblemModel,
    state: &AssignmentState,
    rules: &ScoreRules,
) -> ScoreAggregates {
    let installed: Vec<&EquipmentSet> = (0..model.station_count())
        .map(|s| model.installed_equipment(s))
        .collect();
    calculate_aggregates_with(model, state, rules, &installed)
}

/// Computes every aggregate from scratch against an explicit per-station
/// equipment installation.
pub fn calculate_aggregates_with(
    model: &ProblemModel,
    state: &AssignmentState,
    rules: &ScoreRules,
    installed: &[&EquipmentSet],
) -> ScoreAggregates {
    let mut aggregates = ScoreAggregates {
        dependency_inversions: count_dependency_inversions(model, state, rules.inversion),
        unassigned_tasks: (model.task_count() - state.assigned_count()) as u64,
        ..ScoreAggregates::default()
    };

    for task in 0..model.task_count() {
        if let Some(station) = state.station_of(task) {
            aggregates.missing_equipment +=
                missing_equipment(model.required_equipment(task), installed[station]);
        }
    }

    for (station, &equipment) in installed.iter().enumerate() {
        let load = state.load(station);
        aggregates.cycle_time = aggregates.cycle_time.max(load);
        aggregates.excess_load += rules.station_excess(load);
        aggregates.squared_loads += load * load;
        aggregates.unused_equipment +=
            unused_equipment(equipment, state.needed_equipment(station));
    }
    aggregates
}

/// Counts dependency inversions in the forward direction only: for every
/// assigned task, each dependency that is unassigned or not ordered before it.
pub fn count_dependency_inversions(
    model: &ProblemModel,
    state: &AssignmentState,
    inversion: InversionSemantics,
) -> u64 {
    let mut count = 0;
    for task in 0..model.task_count() {
        let Some(station) = state.station_of(task) else {
            continue;
        };
        for &dependency in model.dependencies(task) {
            match state.station_of(dependency) {
                Some(ds) if inversion.is_ordered(ds, station) => {}
                _ => count += 1,
            }
        }
    }
    count
}

/// `|required| - |required ∩ installed|`
#[inline]
pub fn missing_equipment(required: &EquipmentSet, installed: &EquipmentSet) -> u64 {
    (required.len() - required.intersection_len(installed)) as u64
}

/// `|installed| - |installed ∩ needed|`
#[inline]
pub fn unused_equipment(installed: &EquipmentSet, needed: &EquipmentSet) -> u64 {
    (installed.len() - installed.intersection_len(needed)) as u64
}
