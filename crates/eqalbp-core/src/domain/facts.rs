//! Input records for tasks and equipment instances.

use crate::equipment::EquipmentSet;

/// A task: processing time, direct predecessors and required equipment types.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub id: usize,
    pub time: u64,
    /// Ids of the tasks that must complete before this one.
    pub dependencies: Vec<usize>,
    /// Equipment types that must be installed at the task's station.
    #[cfg_attr(feature = "serde", serde(with = "equipment_ids"))]
    pub equipment: EquipmentSet,
}

impl Task {
    /// Creates a task with no dependencies and no equipment requirements.
    pub fn new(id: usize, time: u64) -> Self {
        Self {
            id,
            time,
            dependencies: Vec::new(),
            equipment: EquipmentSet::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = usize>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    pub fn with_equipment(mut self, equipment_types: impl IntoIterator<Item = usize>) -> Self {
        self.equipment = equipment_types.into_iter().collect();
        self
    }
}

/// A physical equipment instance of some type.
///
/// A pinned instance never leaves `installed_station`. A movable instance may
/// be relocated by the optimizer, which disables incremental scoring.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub id: usize,
    pub equipment_type: usize,
    pub pinned: bool,
    pub installed_station: Option<usize>,
}

impl Equipment {
    /// An instance fixed at `station` for the whole solve.
    pub fn pinned(id: usize, equipment_type: usize, station: usize) -> Self {
        Self {
            id,
            equipment_type,
            pinned: true,
            installed_station: Some(station),
        }
    }

    /// An instance the optimizer may relocate.
    pub fn movable(id: usize, equipment_type: usize, installed_station: Option<usize>) -> Self {
        Self {
            id,
            equipment_type,
            pinned: false,
            installed_station,
        }
    }
}

#[cfg(feature = "serde")]
mod equipment_ids {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::equipment::EquipmentSet;

    pub fn serialize<S: Serializer>(set: &EquipmentSet, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(set.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<EquipmentSet, D::Error> {
        let ids = Vec::<usize>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}
