//! EqALBP - incremental scoring for equipped assembly-line balancing
//!
//! Build a [`ProblemModel`] once, open a [`LineSession`] on an initial
//! assignment, then drive it with `on_unassign`/`on_assign` and read
//! `score()`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use eqalbp::prelude::*;
//!
//! # fn main() -> eqalbp::Result<()> {
//! let model = ProblemModel::new(
//!     vec![
//!         Task::new(0, 4).with_equipment([0]),
//!         Task::new(1, 6).with_dependencies([0]),
//!         Task::new(2, 5).with_dependencies([0]),
//!     ],
//!     2,
//!     vec![Equipment::pinned(0, 0, 0)],
//! )?;
//! let config = EngineConfig::from_toml_str("inversion = \"relaxed\"")?;
//! let stations = [Some(0), Some(0), Some(1)];
//! let mut session = LineSession::initialize(Arc::new(model), &stations, config)?;
//!
//! assert_eq!(session.score(), HardMediumSoftScore::of(0, -10, -125));
//!
//! let m = ChangeMove::new(1, Some(1));
//! let undo = session.do_move(&m);
//! assert_eq!(session.score(), HardMediumSoftScore::of(0, -11, -137));
//! session.undo_move(&m, undo);
//! # Ok(())
//! # }
//! ```

mod error;

#[cfg(feature = "console")]
pub mod console;

pub use error::{EqAlbpError, Result};

// Score types
pub use eqalbp_core::{HardMediumSoftScore, ScoreParseError};

// Problem model
pub use eqalbp_core::{
    AssignmentState, DependencyGraph, Equipment, EquipmentSet, GraphError, ModelError,
    ProblemModel, Task,
};

// Configuration
pub use eqalbp_config::{
    ConfigError, ConstructionScore, EngineConfig, EnvironmentMode, InversionSemantics,
};

// Scoring
pub use eqalbp_scoring::{
    calculate_aggregates, AnyScoreDirector, ScoreAggregates, ScoreDirector, ScoreDirectorFactory,
    ScoreEngine, ScoreError, ScorePhase, ScoreRules, SimpleScoreDirector,
};

// Driver building blocks
pub use eqalbp_solver::{
    derive_seeds, run_workers, ChangeMove, ChangeMoveSelector, FilterError, LineSession, Move,
    MoveSelector, StationWindowFilters, SwapMove, SwapMoveSelector,
};

pub mod prelude {
    pub use super::{
        AssignmentState, EngineConfig, Equipment, EquipmentSet, HardMediumSoftScore,
        InversionSemantics, ProblemModel, Task,
    };
    pub use super::{ChangeMove, LineSession, Move, MoveSelector, ScoreDirector, SwapMove};
}
