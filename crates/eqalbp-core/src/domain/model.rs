//! The immutable problem model.

use std::sync::OnceLock;

use tracing::info;

use super::facts::{Equipment, Task};
use super::TaskSet;
use crate::equipment::EquipmentSet;
use crate::error::{ModelError, Result};
use crate::graph::DependencyGraph;

/// Dense, integer-indexed facts of one line-balancing instance.
///
/// Built once from validated input and never mutated; share it behind an
/// `Arc` between independent search workers.
///
/// `installed_equipment(station)` reflects the equipment placement at build
/// time. It stays valid only while no equipment moves, i.e. when the model
/// [`is_pure_type2`](Self::is_pure_type2).
///
/// # Examples
///
/// ```
/// use eqalbp_core::{Equipment, ProblemModel, Task};
///
/// let model = ProblemModel::new(
///     vec![
///         Task::new(0, 10).with_equipment([0]),
///         Task::new(1, 5).with_dependencies([0]),
///     ],
///     2,
///     vec![Equipment::pinned(0, 0, 0)],
/// )
/// .unwrap();
///
/// assert_eq!(model.successors(0), &[1]);
/// assert_eq!(model.lower_bound_cycle_time(), 10);
/// assert!(model.is_pure_type2());
/// ```
#[derive(Debug, Clone)]
pub struct ProblemModel {
    station_count: usize,
    task_time: Vec<u64>,
    task_equipment: Vec<EquipmentSet>,
    dependencies: DependencyGraph,
    successors: DependencyGraph,
    topological_order: Vec<usize>,
    deep_dependencies: OnceLock<Vec<TaskSet>>,
    station_installed: Vec<EquipmentSet>,
    equipment: Vec<Equipment>,
    equipment_type_count: usize,
    pure_type2: bool,
    total_task_time: u64,
    max_task_time: u64,
}

impl ProblemModel {
    /// Validates the input and builds the dense arrays.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for non-contiguous ids, unknown or cyclic
    /// dependencies, stations out of range, pinned equipment without a station,
    /// or a required equipment type that no instance provides.
    pub fn new(tasks: Vec<Task>, station_count: usize, equipment: Vec<Equipment>) -> Result<Self> {
        if station_count == 0 {
            return Err(ModelError::NoStations);
        }
        for (index, task) in tasks.iter().enumerate() {
            if task.id != index {
                return Err(ModelError::NonContiguousTaskId {
                    index,
                    found: task.id,
                });
            }
        }
        for (index, e) in equipment.iter().enumerate() {
            if e.id != index {
                return Err(ModelError::NonContiguousEquipmentId { index, found: e.id });
            }
            match e.installed_station {
                Some(station) if station >= station_count => {
                    return Err(ModelError::StationOutOfRange {
                        equipment: e.id,
                        station,
                        station_count,
                    });
                }
                None if e.pinned => {
                    return Err(ModelError::PinnedWithoutStation { equipment: e.id });
                }
                _ => {}
            }
        }

        let known_types: EquipmentSet = equipment.iter().map(|e| e.equipment_type).collect();
        for task in &tasks {
            let unknown = task.equipment.iter().find(|&t| !known_types.contains(t));
            if let Some(equipment_type) = unknown {
                return Err(ModelError::UnknownEquipmentType {
                    task: task.id,
                    equipment_type,
                });
            }
        }

        let dependencies =
            DependencyGraph::new(tasks.iter().map(|t| t.dependencies.clone()).collect());
        let topological_order = dependencies.topological_sort()?;
        let successors = dependencies.flip_edges();

        let mut station_installed = vec![EquipmentSet::new(); station_count];
        for e in &equipment {
            if let Some(station) = e.installed_station {
                station_installed[station] = station_installed[station].with(e.equipment_type);
            }
        }

        let task_time: Vec<u64> = tasks.iter().map(|t| t.time).collect();
        let total_task_time = task_time.iter().sum();
        let max_task_time = task_time.iter().copied().max().unwrap_or(0);
        let pure_type2 = equipment.iter().all(|e| e.pinned);

        info!(
            event = "model_built",
            tasks = tasks.len(),
            stations = station_count,
            equipment = equipment.len(),
            dependencies = dependencies.edge_count(),
            pure_type2,
        );

        Ok(Self {
            station_count,
            task_time,
            task_equipment: tasks.into_iter().map(|t| t.equipment).collect(),
            dependencies,
            successors,
            topological_order,
            deep_dependencies: OnceLock::new(),
            station_installed,
            equipment_type_count: known_types.max().map_or(0, |m| m + 1),
            equipment,
            pure_type2,
            total_task_time,
            max_task_time,
        })
    }

    pub fn task_count(&self) -> usize {
        self.task_time.len()
    }

    pub fn station_count(&self) -> usize {
        self.station_count
    }

    /// One past the largest equipment type id present in the instance.
    pub fn equipment_type_count(&self) -> usize {
        self.equipment_type_count
    }

    #[inline]
    pub fn task_time(&self, task: usize) -> u64 {
        self.task_time[task]
    }

    /// Direct predecessors of `task`, ascending.
    #[inline]
    pub fn dependencies(&self, task: usize) -> &[usize] {
        self.dependencies.dependencies(task)
    }

    /// Tasks that directly depend on `task`, ascending.
    #[inline]
    pub fn successors(&self, task: usize) -> &[usize] {
        self.successors.dependencies(task)
    }

    #[inline]
    pub fn required_equipment(&self, task: usize) -> &EquipmentSet {
        &self.task_equipment[task]
    }

    #[inline]
    pub fn installed_equipment(&self, station: usize) -> &EquipmentSet {
        &self.station_installed[station]
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    /// The precedence graph (edges point to dependencies).
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.dependencies
    }

    /// The reversed precedence graph (edges point to dependents).
    pub fn successor_graph(&self) -> &DependencyGraph {
        &self.successors
    }

    /// Tasks in dependency order, ties broken by id.
    pub fn topological_order(&self) -> &[usize] {
        &self.topological_order
    }

    /// Topological layers of the task graph.
    pub fn topological_layers(&self) -> Vec<Vec<usize>> {
        // The graph was validated acyclic in `new`.
        self.dependencies.topological_layers().unwrap_or_default()
    }

    /// Transitive dependencies of `task`. Computed for all tasks on first use.
    pub fn deep_dependencies(&self, task: usize) -> &TaskSet {
        let all = self
            .deep_dependencies
            .get_or_init(|| self.dependencies.deep_dependencies_in_order(&self.topological_order));
        &all[task]
    }

    /// True when every equipment instance is pinned, so station equipment
    /// never changes during a solve.
    pub fn is_pure_type2(&self) -> bool {
        self.pure_type2
    }

    /// Ids of equipment instances that are not pinned.
    pub fn movable_equipment(&self) -> Vec<usize> {
        self.equipment
            .iter()
            .filter(|e| !e.pinned)
            .map(|e| e.id)
            .collect()
    }

    pub fn total_task_time(&self) -> u64 {
        self.total_task_time
    }

    pub fn max_task_time(&self) -> u64 {
        self.max_task_time
    }

    /// `max(longest task, ceil(total time / stations))`: no assignment can
    /// achieve a smaller cycle time.
    pub fn lower_bound_cycle_time(&self) -> u64 {
        let per_station = self.total_task_time.div_ceil(self.station_count as u64);
        self.max_task_time.max(per_station)
    }

    /// Returns true if `station` has every equipment type `task` requires.
    #[inline]
    pub fn is_equipment_compatible(&self, task: usize, station: usize) -> bool {
        self.task_equipment[task].is_subset_of(&self.station_installed[station])
    }

    /// Stations whose installed equipment covers the requirements of `task`.
    pub fn compatible_stations(&self, task: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.station_count).filter(move |&s| self.is_equipment_compatible(task, s))
    }
}
