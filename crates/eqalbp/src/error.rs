//! Error types for EqALBP

use thiserror::Error;

use eqalbp_config::ConfigError;
use eqalbp_core::{GraphError, ModelError};
use eqalbp_scoring::ScoreError;
use eqalbp_solver::FilterError;

/// Main error type for EqALBP operations
#[derive(Debug, Error)]
pub enum EqAlbpError {
    /// Malformed problem instance
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Malformed precedence graph
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Score director could not be built or used as requested
    #[error("Score error: {0}")]
    Score(#[from] ScoreError),

    /// Move filters could not be built
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for EqALBP operations
pub type Result<T> = std::result::Result<T, EqAlbpError>;
