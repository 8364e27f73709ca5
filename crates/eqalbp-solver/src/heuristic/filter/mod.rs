//! Static feasibility filters for change and swap moves.
//!
//! All three predicates depend only on the model, so they are computed once
//! per problem and shared by every worker:
//!
//! - [`EquipmentFilter`] - the station has every equipment type the task needs
//! - [`StationWindows`] - the station lies in the task's `[earliest, latest]` window
//! - [`is_independent_pair`] - neither task of a swap depends on the other

mod equipment;
mod window;

#[cfg(test)]
mod tests;

pub use equipment::EquipmentFilter;
pub use window::StationWindows;

use std::sync::Arc;

use tracing::debug;

use eqalbp_core::ProblemModel;

use crate::error::FilterError;

/// Returns true if neither task is a transitive dependency of the other.
///
/// Swapping two tasks that already sit in dependency order can only put them
/// out of order.
pub fn is_independent_pair(model: &ProblemModel, left: usize, right: usize) -> bool {
    left != right
        && !model.deep_dependencies(left).contains(right)
        && !model.deep_dependencies(right).contains(left)
}

/// The composed move filters for a pure Type-2 model.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use eqalbp_core::{Equipment, ProblemModel, Task};
/// use eqalbp_solver::StationWindowFilters;
///
/// let model = Arc::new(
///     ProblemModel::new(
///         vec![
///             Task::new(0, 5).with_equipment([0]),
///             Task::new(1, 5).with_dependencies([0]),
///             Task::new(2, 5),
///         ],
///         3,
///         vec![Equipment::pinned(0, 0, 1)],
///     )
///     .unwrap(),
/// );
/// let filters = StationWindowFilters::new(Arc::clone(&model)).unwrap();
///
/// // Task 0 needs the equipment at station 1, so task 1 cannot go earlier
/// assert!(!filters.is_feasible_move(0, 0));
/// assert!(filters.is_feasible_move(0, 1));
/// assert_eq!(filters.windows().window(1), 1..=2);
/// assert!(!filters.is_feasible_swap(0, 1));
/// assert!(filters.is_feasible_swap(1, 2));
/// ```
#[derive(Debug, Clone)]
pub struct StationWindowFilters {
    model: Arc<ProblemModel>,
    equipment: EquipmentFilter,
    windows: StationWindows,
}

impl StationWindowFilters {
    /// Precomputes equipment compatibility and station windows.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MovableEquipment`] if any equipment instance is
    /// movable.
    pub fn new(model: Arc<ProblemModel>) -> Result<Self, FilterError> {
        let equipment = EquipmentFilter::new(&model)?;
        let windows = StationWindows::new(&model, &equipment);

        let filters = Self {
            model,
            equipment,
            windows,
        };
        let candidates = filters.model.task_count() * filters.model.station_count();
        let admitted = filters.admitted_move_count();
        debug!(
            event = "filters_built",
            tasks = filters.model.task_count(),
            stations = filters.model.station_count(),
            admitted,
            pruned = candidates - admitted,
            unsatisfiable = filters.equipment.unsatisfiable_tasks().len(),
        );
        Ok(filters)
    }

    pub fn model(&self) -> &ProblemModel {
        &self.model
    }

    pub fn equipment(&self) -> &EquipmentFilter {
        &self.equipment
    }

    pub fn windows(&self) -> &StationWindows {
        &self.windows
    }

    /// Accepts `task → station` iff the station is in range, equipment
    /// compatible and inside the task's window.
    #[inline]
    pub fn is_feasible_move(&self, task: usize, station: usize) -> bool {
        station < self.model.station_count()
            && self.equipment.accepts(task, station)
            && self.windows.contains(task, station)
    }

    /// Accepts a swap iff the two tasks are distinct and independent.
    #[inline]
    pub fn is_feasible_swap(&self, left: usize, right: usize) -> bool {
        is_independent_pair(&self.model, left, right)
    }

    /// Stations `task` may move to, ascending.
    pub fn feasible_stations(&self, task: usize) -> impl Iterator<Item = usize> + '_ {
        self.windows
            .window(task)
            .filter(move |&station| self.equipment.accepts(task, station))
    }

    /// Number of `(task, station)` pairs accepted by [`is_feasible_move`](Self::is_feasible_move).
    pub fn admitted_move_count(&self) -> usize {
        (0..self.model.task_count())
            .map(|task| self.feasible_stations(task).count())
            .sum()
    }
}
