//! Equipment-compatible stations.

use tracing::warn;

use eqalbp_core::{EquipmentSet, ProblemModel};

use crate::error::FilterError;

/// Per task, the stations whose installed equipment covers every required
/// type.
///
/// A task whose requirements no single station satisfies cannot be placed
/// without missing equipment anyway; its requirement is ignored here and left
/// to the hard score.
#[derive(Debug, Clone)]
pub struct EquipmentFilter {
    /// Station ids, one set per task.
    compatible: Vec<EquipmentSet>,
    unsatisfiable: Vec<usize>,
}

impl EquipmentFilter {
    /// # Errors
    ///
    /// Returns [`FilterError::MovableEquipment`] unless every equipment
    /// instance is pinned.
    pub fn new(model: &ProblemModel) -> Result<Self, FilterError> {
        if !model.is_pure_type2() {
            return Err(FilterError::MovableEquipment {
                movable: model.movable_equipment(),
            });
        }

        let all_stations: EquipmentSet = (0..model.station_count()).collect();
        let mut unsatisfiable = Vec::new();
        let compatible = (0..model.task_count())
            .map(|task| {
                let stations: EquipmentSet = model.compatible_stations(task).collect();
                if stations.is_empty() {
                    warn!(
                        task,
                        required = ?model.required_equipment(task),
                        "no station has every required equipment type"
                    );
                    unsatisfiable.push(task);
                    all_stations.clone()
                } else {
                    stations
                }
            })
            .collect();

        Ok(Self {
            compatible,
            unsatisfiable,
        })
    }

    #[inline]
    pub fn accepts(&self, task: usize, station: usize) -> bool {
        self.compatible[task].contains(station)
    }

    /// Compatible stations of `task`, as a set of station ids.
    pub fn compatible_stations(&self, task: usize) -> &EquipmentSet {
        &self.compatible[task]
    }

    /// Lowest compatible station.
    pub fn min_station(&self, task: usize) -> Option<usize> {
        self.compatible[task].iter().next()
    }

    /// Highest compatible station.
    pub fn max_station(&self, task: usize) -> Option<usize> {
        self.compatible[task].max()
    }

    /// Tasks whose requirements no station satisfies.
    pub fn unsatisfiable_tasks(&self) -> &[usize] {
        &self.unsatisfiable
    }
}
