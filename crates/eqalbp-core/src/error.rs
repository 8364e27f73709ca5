//! Error types for malformed precedence graphs and problem instances.

use thiserror::Error;

/// Error raised by the [`DependencyGraph`](crate::graph::DependencyGraph) utilities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge points to a node the graph does not contain.
    #[error("node {node} depends on unknown node {dependency}")]
    UnknownNode { node: usize, dependency: usize },

    /// The graph is not acyclic. `path` lists the cycle in dependency order,
    /// starting and ending at the same node.
    #[error("dependency cycle detected: {}", format_path(.path))]
    Cycle { path: Vec<usize> },
}

/// Error raised when a problem instance cannot be turned into a [`ProblemModel`].
///
/// These are structural violations; the scoring and filtering code never sees
/// an instance that produced one.
///
/// [`ProblemModel`]: crate::domain::ProblemModel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("problem has no stations")]
    NoStations,

    #[error("task at index {index} has id {found}; task ids must be dense and zero-based")]
    NonContiguousTaskId { index: usize, found: usize },

    #[error(
        "equipment at index {index} has id {found}; equipment ids must be dense and zero-based"
    )]
    NonContiguousEquipmentId { index: usize, found: usize },

    #[error("task {task} depends on unknown task {dependency}")]
    UnknownDependency { task: usize, dependency: usize },

    #[error("cyclic task dependencies: {}", format_path(.path))]
    CyclicDependencies { path: Vec<usize> },

    #[error("equipment {equipment} is installed at station {station}, but the line has {station_count} stations")]
    StationOutOfRange {
        equipment: usize,
        station: usize,
        station_count: usize,
    },

    #[error("task {task} requires equipment type {equipment_type}, which no equipment instance provides")]
    UnknownEquipmentType { task: usize, equipment_type: usize },

    #[error("equipment {equipment} is pinned but not installed at any station")]
    PinnedWithoutStation { equipment: usize },
}

impl From<GraphError> for ModelError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::UnknownNode { node, dependency } => ModelError::UnknownDependency {
                task: node,
                dependency,
            },
            GraphError::Cycle { path } => ModelError::CyclicDependencies { path },
        }
    }
}

fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type alias for model construction.
pub type Result<T> = std::result::Result<T, ModelError>;
