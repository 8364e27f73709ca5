use std::sync::Arc;

use eqalbp::prelude::*;
use eqalbp::{EqAlbpError, ModelError, ScoreError};
use eqalbp_test::{exemplar_model, exemplar_stations};

fn open(stations: &[Option<usize>]) -> eqalbp::Result<LineSession> {
    let session =
        LineSession::initialize(Arc::new(exemplar_model()), stations, EngineConfig::default())?;
    Ok(session)
}

#[test]
fn test_exemplar_through_facade() {
    let mut session = open(&exemplar_stations()).unwrap();
    assert_eq!(session.score(), HardMediumSoftScore::of(0, -42, -4123));
}

#[test]
fn test_model_error_converts() {
    let err: EqAlbpError = ProblemModel::new(vec![Task::new(0, 1)], 0, Vec::new())
        .map_err(EqAlbpError::from)
        .unwrap_err();
    assert!(matches!(err, EqAlbpError::Model(ModelError::NoStations)));
    assert_eq!(err.to_string(), "Model error: problem has no stations");
}

#[test]
fn test_score_error_converts() {
    let err = open(&[Some(0); 3]).err().unwrap();
    assert!(matches!(
        err,
        EqAlbpError::Score(ScoreError::StateMismatch { .. })
    ));
}

#[test]
fn test_config_error_converts() {
    let err: EqAlbpError = EngineConfig::from_toml_str("inversion = 3")
        .map_err(EqAlbpError::from)
        .unwrap_err();
    assert!(matches!(err, EqAlbpError::Config(_)));
}
