use crate::model::Playlist;
use std::fmt;
use uuid::Uuid;

/// Identity of a node in an editing session
///
/// Distinct from the playlist ID: the same playlist can sit at several
/// places in the tree, each with its own node. IDs are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Generate a fresh, never-before-seen node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One position in the dependency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub id: NodeId,

    /// Playlist shown at this position
    pub playlist: Playlist,

    /// Parent node (None for roots)
    pub parent: Option<NodeId>,

    /// Child nodes, i.e. this playlist's dependencies (ordered)
    pub children: Vec<NodeId>,
}

impl DependencyNode {
    pub(crate) fn new(playlist: Playlist, parent: Option<NodeId>) -> Self {
        Self {
            id: NodeId::new(),
            playlist,
            parent,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
