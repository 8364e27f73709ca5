//! The mutable task → station assignment.

use std::collections::BTreeSet;

use super::model::ProblemModel;
use crate::equipment::EquipmentSet;

/// Which station each task occupies, plus aggregates kept in step with it:
/// per-station load, assigned tasks and needed equipment types.
///
/// `None` is the "no station" value. An unassigned task contributes nothing
/// to any station aggregate.
///
/// The model is passed to every mutator instead of being stored, so a state
/// can be cloned cheaply per worker while the model stays shared.
///
/// # Examples
///
/// ```
/// use eqalbp_core::{AssignmentState, Equipment, ProblemModel, Task};
///
/// let model = ProblemModel::new(
///     vec![Task::new(0, 10).with_equipment([0]), Task::new(1, 5)],
///     2,
///     vec![Equipment::pinned(0, 0, 0)],
/// )
/// .unwrap();
///
/// let mut state = AssignmentState::new(&model);
/// state.assign(&model, 0, Some(1));
/// state.assign(&model, 1, Some(1));
/// assert_eq!(state.load(1), 15);
///
/// let previous = state.assign(&model, 0, Some(0));
/// assert_eq!(previous, Some(1));
/// assert_eq!(state.load(1), 5);
/// assert!(state.needed_equipment(0).contains(0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentState {
    stations: Vec<Option<usize>>,
    station_load: Vec<u64>,
    station_tasks: Vec<BTreeSet<usize>>,
    /// `needed_counts[station][type]`: assigned tasks at `station` requiring `type`.
    needed_counts: Vec<Vec<u32>>,
    station_needed: Vec<EquipmentSet>,
    assigned_count: usize,
}

impl AssignmentState {
    /// A state with every task unassigned.
    pub fn new(model: &ProblemModel) -> Self {
        let station_count = model.station_count();
        Self {
            stations: vec![None; model.task_count()],
            station_load: vec![0; station_count],
            station_tasks: vec![BTreeSet::new(); station_count],
            needed_counts: vec![vec![0; model.equipment_type_count()]; station_count],
            station_needed: vec![EquipmentSet::new(); station_count],
            assigned_count: 0,
        }
    }

    /// A state seeded from a per-task station list, e.g. produced by a
    /// construction heuristic.
    ///
    /// # Panics
    ///
    /// Panics if `stations.len()` differs from the task count or a station is
    /// out of range.
    pub fn from_stations(model: &ProblemModel, stations: &[Option<usize>]) -> Self {
        assert_eq!(
            stations.len(),
            model.task_count(),
            "initial assignment lists {} tasks, model has {}",
            stations.len(),
            model.task_count()
        );
        let mut state = Self::new(model);
        for (task, &station) in stations.iter().enumerate() {
            state.assign(model, task, station);
        }
        state
    }

    /// Moves `task` to `station` (or unassigns it) and updates every
    /// per-station aggregate. Returns the previous station.
    ///
    /// # Panics
    ///
    /// Panics if `task` or `station` is unknown to the model.
    pub fn assign(
        &mut self,
        model: &ProblemModel,
        task: usize,
        station: Option<usize>,
    ) -> Option<usize> {
        assert!(
            task < self.stations.len(),
            "unknown task {} (model has {} tasks)",
            task,
            self.stations.len()
        );
        if let Some(s) = station {
            assert!(
                s < self.station_load.len(),
                "unknown station {} (model has {} stations)",
                s,
                self.station_load.len()
            );
        }

        let previous = self.stations[task];
        if previous == station {
            return previous;
        }
        if let Some(old) = previous {
            self.remove_from_station(model, task, old);
            self.assigned_count -= 1;
        }
        if let Some(new) = station {
            self.add_to_station(model, task, new);
            self.assigned_count += 1;
        }
        self.stations[task] = station;
        previous
    }

    fn remove_from_station(&mut self, model: &ProblemModel, task: usize, station: usize) {
        self.station_load[station] -= model.task_time(task);
        self.station_tasks[station].remove(&task);
        let counts = &mut self.needed_counts[station];
        let mut needed = self.station_needed[station].clone();
        for equipment_type in model.required_equipment(task) {
            counts[equipment_type] -= 1;
            if counts[equipment_type] == 0 {
                needed = needed.without(equipment_type);
            }
        }
        self.station_needed[station] = needed;
    }

    fn add_to_station(&mut self, model: &ProblemModel, task: usize, station: usize) {
        self.station_load[station] += model.task_time(task);
        self.station_tasks[station].insert(task);
        let counts = &mut self.needed_counts[station];
        let mut needed = self.station_needed[station].clone();
        for equipment_type in model.required_equipment(task) {
            if counts[equipment_type] == 0 {
                needed = needed.with(equipment_type);
            }
            counts[equipment_type] += 1;
        }
        self.station_needed[station] = needed;
    }

    /// The station of `task`, or `None` if unassigned.
    #[inline]
    pub fn station_of(&self, task: usize) -> Option<usize> {
        self.stations[task]
    }

    /// Per-task stations.
    pub fn stations(&self) -> &[Option<usize>] {
        &self.stations
    }

    #[inline]
    pub fn load(&self, station: usize) -> u64 {
        self.station_load[station]
    }

    pub fn loads(&self) -> &[u64] {
        &self.station_load
    }

    /// Tasks currently assigned to `station`, ascending.
    pub fn tasks_at(&self, station: usize) -> &BTreeSet<usize> {
        &self.station_tasks[station]
    }

    /// Equipment types required by at least one task assigned to `station`.
    pub fn needed_equipment(&self, station: usize) -> &EquipmentSet {
        &self.station_needed[station]
    }

    pub fn task_count(&self) -> usize {
        self.stations.len()
    }

    pub fn station_count(&self) -> usize {
        self.station_load.len()
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned_count
    }

    /// True when every task has a station.
    pub fn is_complete(&self) -> bool {
        self.assigned_count == self.stations.len()
    }
}
