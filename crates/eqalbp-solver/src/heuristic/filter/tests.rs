use std::sync::Arc;

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use eqalbp_config::{EngineConfig, InversionSemantics};
use eqalbp_core::{AssignmentState, Equipment, ProblemModel, Task};
use eqalbp_scoring::{calculate_aggregates, ScoreRules};
use eqalbp_test::exemplar::{
    exemplar_model, exemplar_model_with_movable_equipment, EXEMPLAR_ASSIGNMENT,
};

use super::*;
use crate::error::FilterError;

fn exemplar_filters() -> StationWindowFilters {
    StationWindowFilters::new(Arc::new(exemplar_model())).unwrap()
}

#[test]
fn test_exemplar_windows() {
    let filters = exemplar_filters();
    let windows: Vec<_> = (0..10).map(|t| filters.windows().window(t)).collect();
    assert_eq!(
        windows,
        vec![0..=0, 0..=1, 0..=1, 2..=2, 2..=2, 0..=5, 2..=3, 0..=5, 0..=5, 2..=5]
    );
}

#[test]
fn test_exemplar_assignment_passes_every_filter() {
    let filters = exemplar_filters();
    for (task, &station) in EXEMPLAR_ASSIGNMENT.iter().enumerate() {
        assert!(filters.is_feasible_move(task, station), "task {task} at {station}");
    }
}

#[test]
fn test_equipment_compatibility() {
    let filters = exemplar_filters();
    let compatible: Vec<Vec<usize>> = (0..10)
        .map(|t| filters.equipment().compatible_stations(t).iter().collect())
        .collect();
    assert_eq!(compatible[0], vec![0]);
    assert_eq!(compatible[3], vec![2]);
    assert_eq!(compatible[6], vec![2, 3]);
    assert_eq!(compatible[9], vec![2, 5]);
    assert_eq!(compatible[5], vec![0, 1, 2, 3, 4, 5]);

    // In window 2..=5 but station 4 lacks type 2
    assert!(!filters.is_feasible_move(9, 4));
    assert!(filters.is_feasible_move(9, 5));
    assert!(!filters.is_feasible_move(9, 6));
}

#[test]
fn test_feasible_stations_and_count() {
    let filters = exemplar_filters();
    assert_eq!(filters.feasible_stations(9).collect::<Vec<_>>(), vec![2, 5]);
    assert_eq!(filters.feasible_stations(7).count(), 6);
    assert_eq!(filters.admitted_move_count(), 29);
}

#[test]
fn test_never_swap_dependent() {
    let filters = exemplar_filters();
    // 9 depends on 0 through 2 and 3
    assert!(!filters.is_feasible_swap(0, 9));
    assert!(!filters.is_feasible_swap(9, 0));
    assert!(!filters.is_feasible_swap(7, 8));
    assert!(!filters.is_feasible_swap(3, 3));
    assert!(filters.is_feasible_swap(3, 4));
    assert!(filters.is_feasible_swap(5, 6));
    assert!(filters.is_feasible_swap(0, 1));
}

#[test]
fn test_movable_equipment_rejected() {
    let err =
        StationWindowFilters::new(Arc::new(exemplar_model_with_movable_equipment())).unwrap_err();
    assert_eq!(err, FilterError::MovableEquipment { movable: vec![8] });
}

#[test]
fn test_unsatisfiable_requirement_is_ignored() {
    let model = ProblemModel::new(
        vec![Task::new(0, 3).with_equipment([0, 1]), Task::new(1, 3)],
        2,
        vec![Equipment::pinned(0, 0, 0), Equipment::pinned(1, 1, 1)],
    )
    .unwrap();
    let filters = StationWindowFilters::new(Arc::new(model)).unwrap();
    assert_eq!(filters.equipment().unsatisfiable_tasks(), &[0]);
    assert!(filters.is_feasible_move(0, 0));
    assert!(filters.is_feasible_move(0, 1));
}

#[test]
fn test_empty_window_when_equipment_contradicts_order() {
    // Task 1 depends on task 0, but its equipment sits before task 0's
    let model = ProblemModel::new(
        vec![
            Task::new(0, 1).with_equipment([1]),
            Task::new(1, 1).with_dependencies([0]).with_equipment([0]),
        ],
        3,
        vec![Equipment::pinned(0, 0, 0), Equipment::pinned(1, 1, 2)],
    )
    .unwrap();
    let filters = StationWindowFilters::new(Arc::new(model)).unwrap();
    assert_eq!(filters.windows().width(0), 0);
    assert_eq!(filters.windows().width(1), 0);
    assert_eq!(filters.admitted_move_count(), 0);
}

/// An instance built around a known assignment that satisfies every
/// precedence (relaxed) and equipment requirement.
fn feasible_instance(
    tasks: usize,
    stations: usize,
    types: usize,
    seed: u64,
) -> (ProblemModel, Vec<usize>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let assignment: Vec<usize> = (0..tasks).map(|_| rng.random_range(0..stations)).collect();

    let mut equipment = Vec::new();
    let mut installed = vec![Vec::new(); stations];
    for equipment_type in 0..types {
        let station = rng.random_range(0..stations);
        equipment.push(Equipment::pinned(equipment.len(), equipment_type, station));
        installed[station].push(equipment_type);
    }

    let task_list = (0..tasks)
        .map(|t| {
            let dependencies: Vec<usize> = (0..t)
                .filter(|&p| assignment[p] <= assignment[t] && rng.random_bool(0.3))
                .collect();
            let available = &installed[assignment[t]];
            let required: Vec<usize> = available
                .iter()
                .copied()
                .filter(|_| rng.random_bool(0.5))
                .collect();
            Task::new(t, rng.random_range(1..=20))
                .with_dependencies(dependencies)
                .with_equipment(required)
        })
        .collect();

    let model = ProblemModel::new(task_list, stations, equipment).unwrap();
    (model, assignment)
}

proptest! {
    #[test]
    fn prop_windows_admit_feasible_assignments(
        tasks in 1usize..16,
        stations in 1usize..7,
        types in 0usize..5,
        seed in any::<u64>(),
    ) {
        let (model, assignment) = feasible_instance(tasks, stations, types, seed);

        let config = EngineConfig::default().with_inversion(InversionSemantics::Relaxed);
        let state = AssignmentState::from_stations(
            &model,
            &assignment.iter().map(|&s| Some(s)).collect::<Vec<_>>(),
        );
        let aggregates = calculate_aggregates(&model, &state, &ScoreRules::new(&model, &config));
        prop_assert_eq!(aggregates.hard_violations(), 0);

        let filters = StationWindowFilters::new(Arc::new(model)).unwrap();
        for (task, &station) in assignment.iter().enumerate() {
            prop_assert!(filters.windows().contains(task, station));
            prop_assert!(filters.is_feasible_move(task, station));
        }
    }
}
