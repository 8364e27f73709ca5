//! The 10-task reference instance.
//!
//! Tasks 0..9 with times `10..=19`, precedence
//! `0→2, 1→2, 2→{3,4,5}, 3&4→6, 5→7→8, 6&8→9` and equipment requirements
//! `{0:{0}, 1:{1}, 2:{1}, 3:{2,3}, 4:{2,4}, 6:{4}, 9:{2}}`, on six stations
//! equipped `{0:{0,1}, 1:{1}, 2:{2,3,4}, 3:{4}, 5:{2}}`.
//!
//! # Example
//!
//! ```
//! use eqalbp_test::exemplar::{exemplar_model, exemplar_stations, EXEMPLAR_LOADS};
//! use eqalbp_core::AssignmentState;
//!
//! let model = exemplar_model();
//! let state = AssignmentState::from_stations(&model, &exemplar_stations());
//! assert_eq!(state.loads(), &EXEMPLAR_LOADS);
//! ```

use eqalbp_core::{Equipment, ProblemModel, Task};

pub const TASK_TIMES: [u64; 10] = [10, 11, 12, 13, 14, 15, 16, 17, 18, 19];

pub const STATION_COUNT: usize = 6;

/// Station of each task in the feasible reference assignment.
pub const EXEMPLAR_ASSIGNMENT: [usize; 10] = [0, 0, 1, 2, 2, 2, 3, 3, 4, 5];

/// Station loads under [`EXEMPLAR_ASSIGNMENT`].
pub const EXEMPLAR_LOADS: [u64; 6] = [21, 12, 42, 33, 18, 19];

/// `21² + 12² + 42² + 33² + 18² + 19²`
pub const EXEMPLAR_SQUARED_LOADS: u64 = 4123;

const DEPENDENCIES: [&[usize]; 10] = [
    &[],
    &[],
    &[0, 1],
    &[2],
    &[2],
    &[2],
    &[3, 4],
    &[5],
    &[7],
    &[6, 8],
];

const REQUIRED_EQUIPMENT: [&[usize]; 10] = [
    &[0],
    &[1],
    &[1],
    &[2, 3],
    &[2, 4],
    &[],
    &[4],
    &[],
    &[],
    &[2],
];

/// `(equipment type, station)` of every installed instance.
const PLACEMENT: [(usize, usize); 8] = [
    (0, 0),
    (1, 0),
    (1, 1),
    (2, 2),
    (3, 2),
    (4, 2),
    (4, 3),
    (2, 5),
];

/// The exemplar tasks.
pub fn exemplar_tasks() -> Vec<Task> {
    (0..TASK_TIMES.len())
        .map(|i| {
            Task::new(i, TASK_TIMES[i])
                .with_dependencies(DEPENDENCIES[i].iter().copied())
                .with_equipment(REQUIRED_EQUIPMENT[i].iter().copied())
        })
        .collect()
}

/// The exemplar equipment, all pinned.
pub fn exemplar_equipment() -> Vec<Equipment> {
    PLACEMENT
        .iter()
        .enumerate()
        .map(|(id, &(equipment_type, station))| Equipment::pinned(id, equipment_type, station))
        .collect()
}

/// The exemplar as a pure Type-2 model (all equipment pinned).
pub fn exemplar_model() -> ProblemModel {
    ProblemModel::new(exemplar_tasks(), STATION_COUNT, exemplar_equipment())
        .expect("exemplar instance is valid")
}

/// The exemplar with one extra movable instance of type 0 at station 4,
/// which makes the model unsuitable for incremental scoring.
pub fn exemplar_model_with_movable_equipment() -> ProblemModel {
    let mut equipment = exemplar_equipment();
    equipment.push(Equipment::movable(equipment.len(), 0, Some(4)));
    ProblemModel::new(exemplar_tasks(), STATION_COUNT, equipment)
        .expect("exemplar instance is valid")
}

/// [`EXEMPLAR_ASSIGNMENT`] in the `Option` form taken by `AssignmentState`.
pub fn exemplar_stations() -> Vec<Option<usize>> {
    EXEMPLAR_ASSIGNMENT.iter().map(|&s| Some(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exemplar_is_valid() {
        let model = exemplar_model();
        assert_eq!(model.task_count(), 10);
        assert!(model.is_pure_type2());
        assert_eq!(
            EXEMPLAR_LOADS.iter().map(|l| l * l).sum::<u64>(),
            EXEMPLAR_SQUARED_LOADS
        );
    }

    #[test]
    fn test_movable_variant() {
        let model = exemplar_model_with_movable_equipment();
        assert!(!model.is_pure_type2());
        assert_eq!(model.movable_equipment(), vec![8]);
    }
}
