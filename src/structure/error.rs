use super::node::NodeId;
use thiserror::Error;

/// Reasons an edit to a dependency tree was rejected
///
/// Every variant is recoverable: the caller keeps the previous tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid dependencies: {0}")]
    InvalidDependencies(String),

    #[error("Dependency cycle involving playlist {0}")]
    DependencyCycle(String),
}

/// Errors reading or writing a definition document
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Malformed definition: {0}")]
    Json(#[from] serde_json::Error),
}
