//! Conversion between dependency trees and portable definitions

use super::definition::{Definition, PlaylistSpec, DEFINITION_VERSION};
use super::error::StructuralError;
use super::graph::DependencyGraph;
use super::node::{DependencyNode, NodeId};
use crate::model::{Playlist, Provider};
use crate::validation::validate_definition;
use std::collections::{HashMap, HashSet};

/// Export a tree as a definition
///
/// Returns `None` if the resulting definition does not pass structural
/// validation, which only happens if the nodes were assembled without
/// going through the graph's edit operations.
pub fn to_definition(
    graph: &DependencyGraph,
    name: &str,
    user_id: &str,
    provider: Provider,
) -> Option<Definition> {
    let playlists = match build_specs(graph) {
        Ok(specs) => specs,
        Err(e) => {
            log::warn!("Cannot export dependency tree: {}", e);
            return None;
        }
    };

    let definition = Definition {
        version: DEFINITION_VERSION,
        name: name.to_string(),
        provider,
        user_id: user_id.to_string(),
        playlists,
    };

    match validate_definition(&definition) {
        Ok(()) => Some(definition),
        Err(e) => {
            log::warn!("Exported definition failed validation: {}", e);
            None
        }
    }
}

/// Import a definition as an editable tree
///
/// Each occurrence of a playlist gets its own freshly generated node.
/// Playlists missing from `known_playlists` (deleted upstream, or no longer
/// accessible) are shown as placeholders instead of failing the import.
pub fn from_definition(definition: &Definition, known_playlists: &[Playlist]) -> DependencyGraph {
    let known: HashMap<&str, &Playlist> = known_playlists
        .iter()
        .map(|playlist| (playlist.id.as_str(), playlist))
        .collect();

    fn push(
        spec: &PlaylistSpec,
        parent: Option<NodeId>,
        known: &HashMap<&str, &Playlist>,
        nodes: &mut Vec<DependencyNode>,
    ) -> NodeId {
        let playlist = match known.get(spec.id.as_str()) {
            Some(playlist) => (*playlist).clone(),
            None => {
                log::debug!("Playlist {} not available, using placeholder", spec.id);
                Playlist::unknown(spec.id.clone())
            }
        };

        let node = DependencyNode::new(playlist, parent);
        let id = node.id;
        let index = nodes.len();
        nodes.push(node);

        let children: Vec<NodeId> = spec
            .dependencies
            .iter()
            .map(|dependency| push(dependency, Some(id), known, nodes))
            .collect();
        nodes[index].children = children;

        id
    }

    let mut nodes = Vec::new();
    for spec in &definition.playlists {
        push(spec, None, &known, &mut nodes);
    }

    log::debug!(
        "Imported definition '{}' as {} nodes",
        definition.name,
        nodes.len()
    );
    DependencyGraph::from_nodes_unchecked(nodes)
}

/// Build the playlist-ID forest described by a graph's nodes
///
/// Fails if some node cannot be reached from a root, or is reached twice,
/// which means the node links themselves are broken.
pub(crate) fn build_specs(graph: &DependencyGraph) -> Result<Vec<PlaylistSpec>, StructuralError> {
    fn build(
        graph: &DependencyGraph,
        node: &DependencyNode,
        visited: &mut HashSet<NodeId>,
    ) -> Result<PlaylistSpec, StructuralError> {
        if !visited.insert(node.id) {
            return Err(StructuralError::InvalidDependencies(format!(
                "node {} is reachable more than once",
                node.id
            )));
        }

        let mut dependencies = Vec::with_capacity(node.children.len());
        for child_id in &node.children {
            let child = graph
                .get_by_id(*child_id)
                .ok_or(StructuralError::NodeNotFound(*child_id))?;
            dependencies.push(build(graph, child, visited)?);
        }

        Ok(PlaylistSpec {
            id: node.playlist.id.clone(),
            dependencies,
        })
    }

    let mut visited = HashSet::new();
    let mut specs = Vec::new();
    for root in graph.roots() {
        specs.push(build(graph, root, &mut visited)?);
    }

    if visited.len() != graph.len() {
        return Err(StructuralError::InvalidDependencies(format!(
            "{} node(s) not reachable from any root",
            graph.len() - visited.len()
        )));
    }

    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(id: &str) -> Playlist {
        Playlist {
            id: id.to_string(),
            title: format!("Playlist {}", id),
            thumbnail_url: String::new(),
            items_total: 3,
            url: format!("https://example.com/{}", id),
        }
    }

    /// Multiset of (playlist, parent playlist) pairs for a graph
    fn edge_multiset(graph: &DependencyGraph) -> Vec<(String, Option<String>)> {
        let mut edges: Vec<(String, Option<String>)> = graph
            .nodes()
            .iter()
            .map(|node| {
                let parent = node
                    .parent
                    .and_then(|p| graph.get_by_id(p))
                    .map(|p| p.playlist.id.clone());
                (node.playlist.id.clone(), parent)
            })
            .collect();
        edges.sort();
        edges
    }

    fn sample_graph() -> DependencyGraph {
        let (graph, a) = DependencyGraph::new().add_root(playlist("A")).unwrap();
        let (graph, b) = graph.add_child(a, playlist("B")).unwrap();
        let (graph, _) = graph.add_child(b, playlist("C")).unwrap();
        let (graph, _) = graph.add_child(a, playlist("C")).unwrap();
        let (graph, _) = graph.add_root(playlist("D")).unwrap();
        graph
    }

    #[test]
    fn test_to_definition_nests_children() {
        let definition = to_definition(&sample_graph(), "Mix", "user", Provider::Google).unwrap();

        assert_eq!(definition.version, DEFINITION_VERSION);
        assert_eq!(definition.playlists.len(), 2);
        assert_eq!(definition.playlists[0].id, "A");
        assert_eq!(definition.playlists[0].dependencies[0].id, "B");
        assert_eq!(definition.playlists[0].dependencies[0].dependencies[0].id, "C");
        assert_eq!(definition.playlists[1].id, "D");
    }

    #[test]
    fn test_round_trip_preserves_edges_not_ids() {
        let graph = sample_graph();
        let definition = to_definition(&graph, "Mix", "user", Provider::Google).unwrap();
        let known: Vec<Playlist> = ["A", "B", "C", "D"].iter().map(|id| playlist(id)).collect();

        let restored = from_definition(&definition, &known);

        assert_eq!(edge_multiset(&restored), edge_multiset(&graph));
        for node in restored.nodes() {
            assert!(graph.get_by_id(node.id).is_none());
        }
        assert_eq!(
            to_definition(&restored, "Mix", "user", Provider::Google).unwrap(),
            definition
        );
    }

    #[test]
    fn test_repeated_playlist_gets_distinct_nodes() {
        let definition = to_definition(&sample_graph(), "Mix", "", Provider::Google).unwrap();
        let restored = from_definition(&definition, &[]);

        let c_nodes: Vec<&DependencyNode> = restored
            .nodes()
            .iter()
            .filter(|n| n.playlist.id == "C")
            .collect();
        assert_eq!(c_nodes.len(), 2);
        assert_ne!(c_nodes[0].id, c_nodes[1].id);
        assert_ne!(c_nodes[0].parent, c_nodes[1].parent);
    }

    #[test]
    fn test_unknown_playlists_become_placeholders() {
        let mut definition = Definition::new("Mix", Provider::Google, "");
        definition.playlists.push(PlaylistSpec::with_dependencies(
            "A",
            vec![PlaylistSpec::leaf("gone")],
        ));

        let restored = from_definition(&definition, &[playlist("A")]);

        let root = restored.roots().next().unwrap();
        assert_eq!(root.playlist.title, "Playlist A");
        let child = restored.children_of(root.id)[0];
        assert!(child.playlist.is_unknown());
        assert_eq!(child.playlist.id, "gone");
    }

    #[test]
    fn test_empty_graph_exports_empty_definition() {
        let definition = to_definition(&DependencyGraph::new(), "Empty", "", Provider::Spotify).unwrap();
        assert!(definition.is_empty());
    }

    #[test]
    fn test_broken_graph_does_not_export() {
        let graph = sample_graph();
        let mut nodes = graph.nodes().to_vec();
        let first = nodes[0].id;
        // Make the first root claim to be its own parent
        nodes[0].parent = Some(first);
        nodes[0].children.push(first);

        let broken = DependencyGraph::from_nodes_unchecked(nodes);
        assert!(to_definition(&broken, "Mix", "", Provider::Google).is_none());
    }
}
