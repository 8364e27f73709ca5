use std::sync::Arc;

use eqalbp_config::{EngineConfig, EnvironmentMode};
use eqalbp_core::AssignmentState;
use eqalbp_scoring::{ScoreDirector, ScoreEngine};
use eqalbp_test::exemplar::{exemplar_model, exemplar_stations};

use super::*;

fn exemplar_engine() -> ScoreEngine {
    let model = Arc::new(exemplar_model());
    let state = AssignmentState::from_stations(&model, &exemplar_stations());
    let config = EngineConfig::default().with_environment_mode(EnvironmentMode::FullAssert);
    ScoreEngine::new(model, state, &config).unwrap()
}

#[test]
fn test_change_move_do_and_undo() {
    let mut engine = exemplar_engine();
    let before = engine.score();

    let m = ChangeMove::new(8, Some(5));
    assert!(m.is_doable(&engine));
    let undo = m.do_move(&mut engine);
    assert_eq!(undo, Some(4));
    assert_eq!(engine.state().station_of(8), Some(5));
    assert_eq!(engine.state().load(5), 37);
    assert!(!m.is_doable(&engine));

    m.undo_move(undo, &mut engine);
    assert_eq!(engine.state().station_of(8), Some(4));
    assert_eq!(engine.score(), before);
}

#[test]
fn test_change_move_unassign() {
    let mut engine = exemplar_engine();
    let m = ChangeMove::new(9, None);
    let undo = m.do_move(&mut engine);
    assert_eq!(engine.state().station_of(9), None);
    // Task 9 has no dependents, so unassigning it breaks nothing
    assert_eq!(engine.score().hard(), 0);
    m.undo_move(undo, &mut engine);
    assert_eq!(engine.state().station_of(9), Some(5));
}

#[test]
fn test_change_move_to_current_station_is_not_doable() {
    let engine = exemplar_engine();
    assert!(!ChangeMove::new(3, Some(2)).is_doable(&engine));
    assert_eq!(ChangeMove::new(3, Some(2)).task_indices(), &[3]);
}

#[test]
fn test_swap_move_do_and_undo() {
    let mut engine = exemplar_engine();
    let before = engine.aggregates();

    let m = SwapMove::new(7, 8);
    assert!(m.is_doable(&engine));
    m.do_move(&mut engine);
    assert_eq!(engine.state().station_of(7), Some(4));
    assert_eq!(engine.state().station_of(8), Some(3));
    // 8 now sits before its dependency 7, and 9 still follows 8
    assert_eq!(engine.aggregates().dependency_inversions, 1);

    m.undo_move((), &mut engine);
    assert_eq!(engine.aggregates(), before);
}

#[test]
fn test_swap_with_unassigned_task() {
    let mut engine = exemplar_engine();
    ChangeMove::new(5, None).do_move(&mut engine);

    let m = SwapMove::new(5, 7);
    m.do_move(&mut engine);
    assert_eq!(engine.state().station_of(5), Some(3));
    assert_eq!(engine.state().station_of(7), None);
    m.undo_move((), &mut engine);
    assert_eq!(engine.state().station_of(5), None);
    assert_eq!(engine.state().station_of(7), Some(3));
}

#[test]
fn test_swap_same_station_is_not_doable() {
    let engine = exemplar_engine();
    assert!(!SwapMove::new(3, 4).is_doable(&engine));
    assert!(!SwapMove::new(3, 3).is_doable(&engine));
    assert_eq!(SwapMove::new(3, 6).task_indices(), &[3, 6]);
}

#[test]
fn test_swap_task_with_itself_leaves_state_unchanged() {
    let mut engine = exemplar_engine();
    let state = engine.state().clone();
    let aggregates = engine.aggregates();

    let m = SwapMove::new(4, 4);
    m.do_move(&mut engine);
    assert_eq!(engine.state(), &state);
    assert_eq!(engine.aggregates(), aggregates);
    m.undo_move((), &mut engine);
    assert_eq!(engine.aggregates(), aggregates);
}
