//! Turns a definition plus playlist snapshots into add-item steps

use super::step::SyncStep;
use crate::model::FullPlaylist;
use crate::structure::{Definition, PlaylistSpec};
use std::collections::{HashMap, HashSet};

/// Ordered steps for one sync run, with the snapshots they were planned from
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    pub steps: Vec<SyncStep>,

    /// Playlist ID -> items as fetched before planning
    pub snapshots: HashMap<String, FullPlaylist>,
}

impl SyncPlan {
    /// Number of planned steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if there is nothing to do
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step counts per target playlist, in order of first appearance
    pub fn steps_by_target(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for step in &self.steps {
            match counts
                .iter_mut()
                .find(|(target, _)| *target == step.target_playlist_id)
            {
                Some((_, count)) => *count += 1,
                None => counts.push((step.target_playlist_id.clone(), 1)),
            }
        }
        counts
    }
}

/// Plan the items each playlist is missing from its dependencies
///
/// Dependencies are visited before the playlist that declares them, but
/// every comparison uses the snapshots as fetched: an item added to a
/// mid-level playlist by this run is not forwarded further up until the
/// next run. Playlists without a snapshot contribute no steps, and
/// neither does their subtree.
pub fn plan_sync_steps(
    definition: &Definition,
    snapshots: HashMap<String, FullPlaylist>,
) -> SyncPlan {
    let mut steps = Vec::new();

    for spec in &definition.playlists {
        plan_spec(spec, &snapshots, &mut steps);
    }

    log::info!(
        "Planned {} step(s) for definition '{}'",
        steps.len(),
        definition.name
    );
    SyncPlan { steps, snapshots }
}

fn plan_spec(
    spec: &PlaylistSpec,
    snapshots: &HashMap<String, FullPlaylist>,
    steps: &mut Vec<SyncStep>,
) {
    let Some(target) = snapshots.get(&spec.id) else {
        log::warn!("No snapshot for playlist {}, skipping it", spec.id);
        return;
    };

    for dependency in &spec.dependencies {
        plan_spec(dependency, snapshots, steps);
    }

    let present: HashSet<&str> = target
        .items
        .iter()
        .map(|item| item.external_item_id.as_str())
        .collect();

    for dependency in &spec.dependencies {
        let Some(source) = snapshots.get(&dependency.id) else {
            continue;
        };

        let before = steps.len();
        steps.extend(
            source
                .items
                .iter()
                .filter(|item| !present.contains(item.external_item_id.as_str()))
                .map(|item| SyncStep::add_item(&spec.id, item.clone(), &dependency.id)),
        );

        log::debug!(
            "{} -> {}: {} item(s) missing",
            dependency.id,
            spec.id,
            steps.len() - before
        );
    }
}
