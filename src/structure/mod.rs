//! Dependency tree editing and the portable definition format
//!
//! Trees are edited as a forest of [`DependencyNode`]s and exported as a
//! [`Definition`] keyed by playlist ID.

mod codec;
mod definition;
mod error;
mod graph;
mod node;

pub use codec::{from_definition, to_definition};
pub use definition::{Definition, PlaylistSpec, DEFINITION_VERSION};
pub use error::{DefinitionError, StructuralError};
pub use graph::DependencyGraph;
pub use node::{DependencyNode, NodeId};
