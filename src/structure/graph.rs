use super::codec::build_specs;
use super::error::StructuralError;
use super::node::{DependencyNode, NodeId};
use crate::model::Playlist;
use crate::validation::validate_specs;
use std::collections::HashSet;

/// Editable forest of dependency nodes
///
/// Every edit returns a new graph and leaves the receiver untouched, so a
/// rejected edit costs the caller nothing: keep using the old value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    /// All nodes, in insertion order (roots keep their relative order)
    nodes: Vec<DependencyNode>,
}

impl DependencyGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Build a graph from an existing node set, validating it first
    pub fn from_nodes(nodes: Vec<DependencyNode>) -> Result<Self, StructuralError> {
        let graph = Self { nodes };
        graph.validate()?;
        Ok(graph)
    }

    pub(crate) fn from_nodes_unchecked(nodes: Vec<DependencyNode>) -> Self {
        Self { nodes }
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> &[DependencyNode] {
        &self.nodes
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by ID
    pub fn get_by_id(&self, id: NodeId) -> Option<&DependencyNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Nodes without a parent, in order
    pub fn roots(&self) -> impl Iterator<Item = &DependencyNode> {
        self.nodes.iter().filter(|node| node.is_root())
    }

    /// Children of a node in their declared order (empty if unknown)
    pub fn children_of(&self, id: NodeId) -> Vec<&DependencyNode> {
        self.get_by_id(id)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|child| self.get_by_id(*child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of parent hops from a node to its root (roots are depth 0)
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut node = self.get_by_id(id)?;
        let mut depth = 0;

        while let Some(parent) = node.parent {
            node = self.get_by_id(parent)?;
            depth += 1;
            if depth > self.nodes.len() {
                log::warn!("Parent chain of node {} does not terminate", id);
                return None;
            }
        }

        Some(depth)
    }

    /// Add a new top-level playlist
    pub fn add_root(&self, playlist: Playlist) -> Result<(Self, NodeId), StructuralError> {
        let node = DependencyNode::new(playlist, None);
        let id = node.id;

        let mut next = self.clone();
        next.nodes.push(node);
        next.validate()?;

        log::debug!("Added root node {}", id);
        Ok((next, id))
    }

    /// Add `playlist` as a dependency of the node `parent`
    pub fn add_child(
        &self,
        parent: NodeId,
        playlist: Playlist,
    ) -> Result<(Self, NodeId), StructuralError> {
        let parent_index = self
            .index_of(parent)
            .ok_or(StructuralError::NodeNotFound(parent))?;

        let node = DependencyNode::new(playlist, Some(parent));
        let id = node.id;

        let mut next = self.clone();
        next.nodes[parent_index].children.push(id);
        next.nodes.push(node);
        next.validate()?;

        log::debug!("Added node {} under {}", id, parent);
        Ok((next, id))
    }

    /// Remove a node, handing its children to its parent
    ///
    /// Children of a removed root become roots themselves. Removing an
    /// unknown node is a no-op.
    pub fn remove(&self, id: NodeId) -> Result<Self, StructuralError> {
        let Some(index) = self.index_of(id) else {
            return Ok(self.clone());
        };

        let mut next = self.clone();
        let removed = next.nodes.remove(index);

        for child in &removed.children {
            if let Some(child_index) = next.index_of(*child) {
                next.nodes[child_index].parent = removed.parent;
            }
        }

        if let Some(parent) = removed.parent {
            let parent_index = next
                .index_of(parent)
                .ok_or_else(|| {
                    StructuralError::InvalidDependencies(format!(
                        "node {} points at missing parent {}",
                        id, parent
                    ))
                })?;
            let siblings = &mut next.nodes[parent_index].children;
            siblings.retain(|sibling| *sibling != id);
            siblings.extend(removed.children.iter().copied());
        }

        next.validate()?;

        log::debug!(
            "Removed node {} ({} children reparented)",
            id,
            removed.children.len()
        );
        Ok(next)
    }

    /// Render the forest as an indented outline, one playlist per line
    pub fn render_tree(&self) -> String {
        fn render(graph: &DependencyGraph, node: &DependencyNode, depth: usize, out: &mut String) {
            out.push_str(&"  ".repeat(depth));
            out.push_str(&format!(
                "- {} [{}] ({} items)\n",
                node.playlist.title, node.playlist.id, node.playlist.items_total
            ));
            for child in graph.children_of(node.id) {
                render(graph, child, depth + 1, out);
            }
        }

        let mut out = String::new();
        for root in self.roots() {
            render(self, root, 0, &mut out);
        }
        out
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Check node links, then the playlist-ID graph they describe
    fn validate(&self) -> Result<(), StructuralError> {
        self.check_links()?;
        let specs = build_specs(self)?;
        validate_specs(&specs)
    }

    /// Every parent/children pointer pair must agree
    fn check_links(&self) -> Result<(), StructuralError> {
        let invalid = |message: String| Err(StructuralError::InvalidDependencies(message));

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return invalid(format!("duplicate node {}", node.id));
            }
        }

        for node in &self.nodes {
            if let Some(parent_id) = node.parent {
                let Some(parent) = self.get_by_id(parent_id) else {
                    return invalid(format!("node {} has missing parent {}", node.id, parent_id));
                };
                let listed = parent.children.iter().filter(|c| **c == node.id).count();
                if listed != 1 {
                    return invalid(format!(
                        "node {} listed {} times by its parent {}",
                        node.id, listed, parent_id
                    ));
                }
            }

            for child_id in &node.children {
                match self.get_by_id(*child_id) {
                    Some(child) if child.parent == Some(node.id) => {}
                    Some(_) => {
                        return invalid(format!(
                            "node {} lists {} as a child but is not its parent",
                            node.id, child_id
                        ))
                    }
                    None => {
                        return invalid(format!("node {} has missing child {}", node.id, child_id))
                    }
                }
            }
        }

        Ok(())
    }
}
