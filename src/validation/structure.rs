//! Cycle and shape checks on playlist-ID dependency graphs
//!
//! Vertices are playlist IDs, not tree nodes: two nodes holding the same
//! playlist are one vertex here, so a dependency reached through two
//! different branches is fine, but a playlist that (transitively) depends
//! on itself is not.

use crate::structure::{Definition, PlaylistSpec, StructuralError, DEFINITION_VERSION};
use std::collections::{HashMap, HashSet, VecDeque};

/// Run every structural check against a definition
pub fn validate_definition(definition: &Definition) -> Result<(), StructuralError> {
    if definition.version != DEFINITION_VERSION {
        return Err(StructuralError::InvalidDependencies(format!(
            "unsupported definition version {} (expected {})",
            definition.version, DEFINITION_VERSION
        )));
    }

    validate_specs(&definition.playlists)
}

/// Run the shape and cycle checks against a forest of specs
pub fn validate_specs(specs: &[PlaylistSpec]) -> Result<(), StructuralError> {
    check_shape(specs)?;

    if let Some(playlist_id) = find_cycle(specs) {
        return Err(StructuralError::DependencyCycle(playlist_id));
    }

    Ok(())
}

/// Reject specs whose IDs are missing or blank
pub fn check_shape(specs: &[PlaylistSpec]) -> Result<(), StructuralError> {
    fn walk(spec: &PlaylistSpec, path: &mut Vec<String>) -> Result<(), StructuralError> {
        if spec.id.trim().is_empty() {
            let location = if path.is_empty() {
                "top level".to_string()
            } else {
                format!("under {}", path.join(" > "))
            };
            return Err(StructuralError::InvalidDependencies(format!(
                "playlist with empty id at {}",
                location
            )));
        }

        path.push(spec.id.clone());
        for dependency in &spec.dependencies {
            walk(dependency, path)?;
        }
        path.pop();
        Ok(())
    }

    let mut path = Vec::new();
    for spec in specs {
        walk(spec, &mut path)?;
    }
    Ok(())
}

/// Find a playlist that takes part in (or depends on) a dependency cycle
///
/// Uses Kahn's algorithm over the flattened playlist-ID graph: vertices
/// left over once every dependency-free vertex has been peeled off are
/// on a cycle or downstream of one. Returns the first such vertex in
/// discovery order.
pub fn find_cycle(specs: &[PlaylistSpec]) -> Option<String> {
    let mut order: Vec<&str> = Vec::new();
    // Adjacency list: playlist -> playlists it depends on
    let mut dependencies: HashMap<&str, HashSet<&str>> = HashMap::new();
    // Reverse adjacency: playlist -> playlists that depend on it
    let mut dependents: HashMap<&str, HashSet<&str>> = HashMap::new();

    fn collect<'a>(
        spec: &'a PlaylistSpec,
        order: &mut Vec<&'a str>,
        dependencies: &mut HashMap<&'a str, HashSet<&'a str>>,
        dependents: &mut HashMap<&'a str, HashSet<&'a str>>,
    ) {
        if !dependencies.contains_key(spec.id.as_str()) {
            order.push(spec.id.as_str());
            dependencies.insert(spec.id.as_str(), HashSet::new());
        }

        for dependency in &spec.dependencies {
            if let Some(deps) = dependencies.get_mut(spec.id.as_str()) {
                deps.insert(dependency.id.as_str());
            }
            dependents
                .entry(dependency.id.as_str())
                .or_default()
                .insert(spec.id.as_str());
            collect(dependency, order, dependencies, dependents);
        }
    }

    for spec in specs {
        collect(spec, &mut order, &mut dependencies, &mut dependents);
    }

    let mut remaining: HashMap<&str, usize> = dependencies
        .iter()
        .map(|(id, deps)| (*id, deps.len()))
        .collect();

    // Start with playlists that have no dependencies
    let mut queue: VecDeque<&str> = order
        .iter()
        .copied()
        .filter(|id| remaining.get(id) == Some(&0))
        .collect();

    while let Some(playlist) = queue.pop_front() {
        remaining.remove(playlist);

        if let Some(users) = dependents.get(playlist) {
            for user in users {
                if let Some(count) = remaining.get_mut(user) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push_back(*user);
                    }
                }
            }
        }
    }

    order
        .into_iter()
        .find(|id| remaining.contains_key(id))
        .map(str::to_string)
}
