//! Earliest/latest station per task.

use std::ops::RangeInclusive;

use eqalbp_core::ProblemModel;

use super::equipment::EquipmentFilter;

/// The station window `[earliest, latest]` of every task.
///
/// - `earliest(t) = max(0, earliest(p) for each dependency p, lowest compatible station)`
/// - `latest(t) = min(S - 1, latest(d) for each dependent d, highest compatible station)`
///
/// Both are filled in one pass each over the topological order. Task times
/// are ignored, so a window can be wider than what any good assignment uses
/// but never excludes the station of a task in a feasible assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationWindows {
    earliest: Vec<usize>,
    latest: Vec<usize>,
}

impl StationWindows {
    pub fn new(model: &ProblemModel, equipment: &EquipmentFilter) -> Self {
        let task_count = model.task_count();
        let last_station = model.station_count() - 1;
        let order = model.topological_order();

        let mut earliest = vec![0; task_count];
        for &task in order {
            earliest[task] = model
                .dependencies(task)
                .iter()
                .map(|&p| earliest[p])
                .fold(equipment.min_station(task).unwrap_or(0), usize::max);
        }

        let mut latest = vec![last_station; task_count];
        for &task in order.iter().rev() {
            latest[task] = model
                .successors(task)
                .iter()
                .map(|&d| latest[d])
                .fold(equipment.max_station(task).unwrap_or(last_station), usize::min);
        }

        Self { earliest, latest }
    }

    #[inline]
    pub fn earliest(&self, task: usize) -> usize {
        self.earliest[task]
    }

    #[inline]
    pub fn latest(&self, task: usize) -> usize {
        self.latest[task]
    }

    pub fn window(&self, task: usize) -> RangeInclusive<usize> {
        self.earliest[task]..=self.latest[task]
    }

    #[inline]
    pub fn contains(&self, task: usize, station: usize) -> bool {
        self.earliest[task] <= station && station <= self.latest[task]
    }

    /// Number of stations in the window of `task`; zero when no station fits.
    pub fn width(&self, task: usize) -> usize {
        (self.latest[task] + 1).saturating_sub(self.earliest[task])
    }
}
