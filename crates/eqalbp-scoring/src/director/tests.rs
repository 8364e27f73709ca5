use std::sync::Arc;

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use eqalbp_config::{ConstructionScore, EngineConfig, EnvironmentMode, InversionSemantics};
use eqalbp_core::{AssignmentState, Equipment, HardMediumSoftScore, ProblemModel, Task};
use eqalbp_test::exemplar::{
    exemplar_model, exemplar_model_with_movable_equipment, exemplar_stations, EXEMPLAR_LOADS,
    EXEMPLAR_SQUARED_LOADS,
};
use eqalbp_test::{arb_instance, random_moves};

use super::*;
use crate::calculation::{calculate_aggregates, ScorePhase, ScoreRules};
use crate::error::ScoreError;

fn engine_for(
    model: ProblemModel,
    stations: &[Option<usize>],
    config: &EngineConfig,
) -> ScoreEngine {
    let state = AssignmentState::from_stations(&model, stations);
    ScoreEngine::new(Arc::new(model), state, config).unwrap()
}

fn exemplar_engine(config: &EngineConfig) -> ScoreEngine {
    engine_for(exemplar_model(), &exemplar_stations(), config)
}

/// Issues the unassign/assign pair for one move.
fn apply<D: ScoreDirector>(director: &mut D, task: usize, target: Option<usize>) {
    director.on_unassign(task);
    if let Some(station) = target {
        director.on_assign(task, station);
    }
}

fn from_scratch<D: ScoreDirector>(director: &D, config: &EngineConfig) -> crate::ScoreAggregates {
    let rules = ScoreRules::new(director.model(), config);
    calculate_aggregates(director.model(), director.state(), &rules)
}

#[test]
fn test_exemplar_score() {
    let mut engine = exemplar_engine(&EngineConfig::default());
    assert_eq!(engine.phase(), ScorePhase::LocalSearch);
    assert_eq!(engine.score(), HardMediumSoftScore::of(0, -42, -4123));
    assert_eq!(engine.aggregates().squared_loads, EXEMPLAR_SQUARED_LOADS);
    assert_eq!(engine.state().load(5), EXEMPLAR_LOADS[5]);
    assert_eq!(engine.score().to_string(), "0hard/-42medium/-4123soft");
}

#[test]
fn test_exemplar_move_and_back() {
    let config = EngineConfig::default().with_environment_mode(EnvironmentMode::FullAssert);
    let mut engine = exemplar_engine(&config);
    let before = engine.aggregates();

    // Task 2 onto station 2 with its dependents 3, 4 and 5
    apply(&mut engine, 2, Some(2));
    let aggregates = engine.aggregates();
    assert_eq!(aggregates.dependency_inversions, 3);
    // Station 2 lacks type 1
    assert_eq!(aggregates.missing_equipment, 1);
    assert_eq!(aggregates.cycle_time, 54);
    assert_eq!(engine.score().hard(), -4);

    apply(&mut engine, 2, Some(1));
    assert_eq!(engine.aggregates(), before);
}

#[test]
fn test_same_station_pair_is_identity() {
    let mut engine = exemplar_engine(&EngineConfig::default());
    let state = engine.state().clone();
    let aggregates = engine.aggregates();
    for task in 0..10 {
        let station = engine.state().station_of(task).unwrap();
        apply(&mut engine, task, Some(station));
        assert_eq!(engine.aggregates(), aggregates);
        assert_eq!(engine.state(), &state);
    }
}

#[test]
fn test_cycle_time_drops_when_busiest_station_empties() {
    let mut engine = exemplar_engine(&EngineConfig::default());
    // Station 2 holds 42 = 13 + 14 + 15
    apply(&mut engine, 5, Some(4));
    assert_eq!(engine.aggregates().cycle_time, 33);
    assert_eq!(engine.state().load(4), 33);
    apply(&mut engine, 3, None);
    assert_eq!(engine.aggregates().cycle_time, 33);
    apply(&mut engine, 8, None);
    // Loads [21, 12, 14, 33, 15, 19]
    assert_eq!(engine.aggregates().cycle_time, 33);
    apply(&mut engine, 6, None);
    assert_eq!(engine.aggregates().cycle_time, 21);
    assert_eq!(engine.aggregates(), from_scratch(&engine, &EngineConfig::default()));
}

#[test]
fn test_phase_latches_once() {
    let config = EngineConfig::default();
    let model = exemplar_model();
    let mut engine = engine_for(model, &[None; 10], &config);
    assert_eq!(engine.phase(), ScorePhase::Construction);

    for (task, station) in exemplar_stations().into_iter().enumerate() {
        assert_eq!(engine.phase(), ScorePhase::Construction);
        apply(&mut engine, task, station);
    }
    assert_eq!(engine.phase(), ScorePhase::LocalSearch);
    assert_eq!(engine.score(), HardMediumSoftScore::of(0, -42, -4123));

    // Unassigning again does not return to construction
    apply(&mut engine, 9, None);
    assert_eq!(engine.phase(), ScorePhase::LocalSearch);
    engine.reset_from_scratch();
    assert_eq!(engine.phase(), ScorePhase::LocalSearch);
}

#[test]
fn test_construction_score_improves_when_task_placed_feasibly() {
    let config = EngineConfig::default();
    let mut engine = engine_for(exemplar_model(), &[None; 10], &config);
    // All 8 installed types unused, all 10 tasks unassigned
    let empty = engine.score();
    assert_eq!(empty, HardMediumSoftScore::of(0, 0, -18));

    apply(&mut engine, 0, Some(0));
    let placed = engine.score();
    assert_eq!(placed, HardMediumSoftScore::of(0, 0, -16));
    assert!(placed > empty);
}

#[test]
fn test_construction_score_improves_without_equipment_change() {
    let model = ProblemModel::new(
        vec![Task::new(0, 3), Task::new(1, 4)],
        2,
        vec![Equipment::pinned(0, 0, 0)],
    )
    .unwrap();
    let mut engine = engine_for(model, &[None, None], &EngineConfig::default());
    let before = engine.score();
    assert_eq!(before, HardMediumSoftScore::of(0, 0, -3));

    // Station 1 has no equipment, so only the unassigned count changes
    apply(&mut engine, 0, Some(1));
    let after = engine.score();
    assert_eq!(engine.aggregates().unused_equipment, 1);
    assert_eq!(after, HardMediumSoftScore::of(0, 0, -2));
    assert!(after > before);
    assert_eq!(engine.aggregates(), from_scratch(&engine, &EngineConfig::default()));
}

#[test]
fn test_construction_score_variants() {
    let stations = [Some(2), Some(2), None, None, None, None, None, None, None, None];
    let excess = EngineConfig::default();
    let diff = EngineConfig::default().with_construction_score(ConstructionScore::CycleTimeDiff);
    // Limit ceil(1.2 * 25) = 30, station 2 load 21
    let tight = EngineConfig::default().with_excess_load_factor(1.2);

    let mut engine = engine_for(exemplar_model(), &stations, &excess);
    // Tasks 0 and 1 miss types 0 and 1 at station 2, nothing installed is used
    // and 8 tasks are unassigned
    assert_eq!(engine.score(), HardMediumSoftScore::of(-2, 0, -16));

    let mut engine = engine_for(exemplar_model(), &stations, &diff);
    apply(&mut engine, 2, Some(2));
    apply(&mut engine, 3, Some(2));
    // Load 46 against limit 25
    assert_eq!(engine.score().medium(), -21);

    let mut engine = engine_for(exemplar_model(), &stations, &tight);
    apply(&mut engine, 2, Some(2));
    assert_eq!(engine.score().medium(), -3);
}

#[test]
fn test_relaxed_inversions() {
    let config = EngineConfig::default().with_inversion(InversionSemantics::Relaxed);
    let mut engine = exemplar_engine(&config);
    apply(&mut engine, 2, Some(0));
    assert_eq!(engine.aggregates().dependency_inversions, 0);
    apply(&mut engine, 3, Some(0));
    apply(&mut engine, 4, Some(0));
    apply(&mut engine, 5, Some(0));
    assert_eq!(engine.aggregates().dependency_inversions, 0);
    assert_eq!(engine.aggregates(), from_scratch(&engine, &config));

    let strict = EngineConfig::default();
    let mut engine = exemplar_engine(&strict);
    apply(&mut engine, 2, Some(0));
    assert_eq!(engine.aggregates().dependency_inversions, 2);
}

#[test]
fn test_engine_rejects_movable_equipment() {
    let model = Arc::new(exemplar_model_with_movable_equipment());
    let state = AssignmentState::new(&model);
    let err = ScoreEngine::new(model, state, &EngineConfig::default()).unwrap_err();
    assert_eq!(err, ScoreError::NotPureType2 { movable: vec![8] });
}

#[test]
fn test_engine_rejects_foreign_state() {
    let model = Arc::new(exemplar_model());
    let other = eqalbp_core::ProblemModel::new(
        vec![eqalbp_core::Task::new(0, 1)],
        1,
        Vec::new(),
    )
    .unwrap();
    let state = AssignmentState::new(&other);
    let err = ScoreEngine::new(model, state, &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, ScoreError::StateMismatch { tasks: 1, model_tasks: 10, .. }));
}

#[test]
fn test_factory_falls_back_for_movable_equipment() {
    let factory = ScoreDirectorFactory::new(EngineConfig::default());

    let model = Arc::new(exemplar_model());
    let state = AssignmentState::from_stations(&model, &exemplar_stations());
    let director = factory.build_score_director(model, state).unwrap();
    assert!(director.is_incremental());
    assert!(director.as_incremental().is_some());

    let model = Arc::new(exemplar_model_with_movable_equipment());
    let state = AssignmentState::from_stations(&model, &exemplar_stations());
    let mut director = factory.build_score_director(model, state).unwrap();
    assert!(!director.is_incremental());
    assert_eq!(director.phase(), ScorePhase::LocalSearch);
    assert_eq!(director.score(), HardMediumSoftScore::of(0, -42, -4123));
}

#[test]
fn test_simple_director_relocates_equipment() {
    let model = Arc::new(exemplar_model_with_movable_equipment());
    let mut stations = exemplar_stations();
    stations[0] = Some(4);
    let state = AssignmentState::from_stations(&model, &stations);
    let mut director = SimpleScoreDirector::new(model, state, &EngineConfig::default()).unwrap();

    // Instance 8 (type 0) already sits at station 4
    assert_eq!(director.aggregates().missing_equipment, 0);
    // Task 2 at station 1 now precedes its dependency 0 at station 4
    assert_eq!(director.aggregates().dependency_inversions, 1);

    director.relocate_equipment(8, Some(5)).unwrap();
    assert_eq!(director.aggregates().missing_equipment, 1);
    assert!(director.installed_equipment(5).contains(0));
    assert_eq!(director.score().hard(), -2);

    director.relocate_equipment(8, None).unwrap();
    assert_eq!(director.equipment_station(8), None);
    assert!(!director.installed_equipment(4).contains(0));

    assert_eq!(
        director.relocate_equipment(0, Some(1)),
        Err(ScoreError::PinnedEquipment { equipment: 0 })
    );
    assert_eq!(
        director.relocate_equipment(9, Some(1)),
        Err(ScoreError::UnknownEquipment { equipment: 9 })
    );
    assert_eq!(
        director.relocate_equipment(8, Some(6)),
        Err(ScoreError::UnknownStation { station: 6 })
    );
}

#[test]
fn test_reset_with_replaces_state() {
    let config = EngineConfig::default();
    let mut engine = exemplar_engine(&config);
    let model = Arc::clone(engine.shared_model());
    engine.reset_with(AssignmentState::new(&model)).unwrap();
    assert_eq!(engine.aggregates().cycle_time, 0);
    assert_eq!(engine.phase(), ScorePhase::LocalSearch);
}

#[test]
#[should_panic(expected = "without a preceding on_unassign")]
fn test_assign_without_unassign_panics() {
    let mut engine = exemplar_engine(&EngineConfig::default());
    engine.on_assign(3, 4);
}

#[test]
#[should_panic(expected = "unknown task 10")]
fn test_unknown_task_panics() {
    let mut engine = exemplar_engine(&EngineConfig::default());
    engine.on_unassign(10);
}

#[test]
#[should_panic(expected = "unknown station 6")]
fn test_unknown_station_panics() {
    let mut engine = exemplar_engine(&EngineConfig::default());
    engine.on_unassign(3);
    engine.on_assign(3, 6);
}

#[test]
fn test_long_random_walk_matches_from_scratch() {
    let config = EngineConfig::default().with_environment_mode(EnvironmentMode::FastAssert);
    let mut engine = exemplar_engine(&config);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for step in 0..5_000 {
        let task = rng.random_range(0..10);
        let target = if rng.random_bool(0.1) {
            None
        } else {
            Some(rng.random_range(0..6))
        };
        apply(&mut engine, task, target);
        if step % 97 == 0 {
            engine.score();
        }
    }
    assert_eq!(engine.aggregates(), from_scratch(&engine, &config));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_incremental_matches_from_scratch(
        instance in arb_instance(),
        relaxed in any::<bool>(),
        move_seed in any::<u64>(),
    ) {
        let inversion = if relaxed {
            InversionSemantics::Relaxed
        } else {
            InversionSemantics::Strict
        };
        let config = EngineConfig::default().with_inversion(inversion);
        let moves = random_moves(&instance.model, 200, 0.2, move_seed);
        let mut engine = engine_for(instance.model, &instance.initial, &config);

        for (task, target) in moves {
            apply(&mut engine, task, target);
            let expected = from_scratch(&engine, &config);
            prop_assert_eq!(engine.aggregates(), expected);
        }

        let mut reset = engine.clone();
        reset.reset_from_scratch();
        prop_assert_eq!(reset.score(), engine.score());
    }

    #[test]
    fn prop_same_station_pair_is_identity(instance in arb_instance()) {
        let config = EngineConfig::default();
        let task_count = instance.model.task_count();
        let mut engine = engine_for(instance.model, &instance.initial, &config);
        for task in 0..task_count {
            let before = engine.aggregates();
            let state = engine.state().clone();
            let phase = engine.phase();
            if let Some(station) = engine.state().station_of(task) {
                apply(&mut engine, task, Some(station));
                prop_assert_eq!(engine.aggregates(), before);
                prop_assert_eq!(engine.state(), &state);
                prop_assert_eq!(engine.phase(), phase);
            }
        }
    }

    #[test]
    fn prop_simple_and_incremental_agree(instance in arb_instance(), move_seed in any::<u64>()) {
        let config = EngineConfig::default();
        let model = Arc::new(instance.model);
        let state = AssignmentState::from_stations(&model, &instance.initial);
        let mut engine = ScoreEngine::new(Arc::clone(&model), state.clone(), &config).unwrap();
        let mut simple = SimpleScoreDirector::new(Arc::clone(&model), state, &config).unwrap();

        for (task, target) in random_moves(&model, 50, 0.2, move_seed) {
            apply(&mut engine, task, target);
            apply(&mut simple, task, target);
            prop_assert_eq!(engine.score(), simple.score());
            prop_assert_eq!(engine.phase(), simple.phase());
        }
    }
}
