use std::fs;
use structured_playlist::model::{FullPlaylist, PlaylistItem, Provider};
use structured_playlist::repository::{
    LibraryFileRepository, PlaylistRepository, RetryingRepository,
};
use structured_playlist::structure::{from_definition, to_definition, PlaylistSpec};
use structured_playlist::sync::NoopObserver;
use structured_playlist::{Definition, DependencyGraph, SyncConfig, SyncPipeline};
use tempfile::TempDir;

fn item(id: &str, external: &str, title: &str) -> PlaylistItem {
    PlaylistItem {
        id: id.to_string(),
        external_item_id: external.to_string(),
        title: title.to_string(),
        author: Some("Channel".to_string()),
        position: 0,
    }
}

/// A <- B <- C, where C and B each hold one item of their own
fn chain_library() -> Vec<FullPlaylist> {
    let a = FullPlaylist::new("A", "Everything");
    let mut b = FullPlaylist::new("B", "Music");
    b.push_item(item("b-1", "b1", "Song"));
    let mut c = FullPlaylist::new("C", "Live");
    c.push_item(item("c-1", "c1", "Concert"));
    vec![a, b, c]
}

fn chain_definition() -> Definition {
    let mut definition = Definition::new("Chain", Provider::Google, "");
    definition.playlists = vec![PlaylistSpec::with_dependencies(
        "A",
        vec![PlaylistSpec::with_dependencies(
            "B",
            vec![PlaylistSpec::leaf("C")],
        )],
    )];
    definition
}

fn externals(playlist: &FullPlaylist) -> Vec<&str> {
    playlist
        .items
        .iter()
        .map(|item| item.external_item_id.as_str())
        .collect()
}

#[tokio::test]
async fn test_items_travel_one_level_per_run() {
    let pipeline = SyncPipeline::new(
        SyncConfig::default(),
        LibraryFileRepository::new(chain_library()),
    )
    .with_observer(NoopObserver);

    let first = pipeline.sync_definition(&chain_definition()).await.unwrap();
    assert_eq!(first.successful_steps, 2);

    let a = pipeline.repository().fetch_full_playlist("A").await.unwrap();
    let b = pipeline.repository().fetch_full_playlist("B").await.unwrap();
    assert_eq!(externals(&a), vec!["b1"]);
    assert_eq!(externals(&b), vec!["b1", "c1"]);

    let second = pipeline.sync_definition(&chain_definition()).await.unwrap();
    assert_eq!(second.successful_steps, 1);

    let a = pipeline.repository().fetch_full_playlist("A").await.unwrap();
    assert_eq!(externals(&a), vec!["b1", "c1"]);
    assert_eq!(a.items[1].title, "Concert");

    let third = pipeline.sync_definition(&chain_definition()).await.unwrap();
    assert_eq!(third.total_steps, 0);
}

#[tokio::test]
async fn test_sync_against_library_file_on_disk() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let library_path = dir.path().join("library.json");
    let definition_path = dir.path().join("definition.json");

    LibraryFileRepository::new(chain_library())
        .save(&library_path)
        .unwrap();
    fs::write(&definition_path, chain_definition().to_json_pretty().unwrap()).unwrap();

    let raw = fs::read_to_string(&definition_path).unwrap();
    let repository = RetryingRepository::new(LibraryFileRepository::load(&library_path).unwrap());
    let pipeline =
        SyncPipeline::new(SyncConfig::default(), repository).with_observer(NoopObserver);

    let report = pipeline.sync(&raw).await.unwrap();
    assert!(report.is_complete_success());
    pipeline.repository().inner().save(&library_path).unwrap();

    let reloaded = LibraryFileRepository::load(&library_path).unwrap();
    let b = reloaded.fetch_full_playlist("B").await.unwrap();
    assert_eq!(externals(&b), vec!["b1", "c1"]);
    assert_eq!(b.items[1].position, 1);
}

#[test]
fn test_definition_file_round_trip_through_tree() {
    let library = chain_library();
    let summaries: Vec<_> = library.iter().map(FullPlaylist::summary).collect();
    let definition = chain_definition();

    let graph = from_definition(&definition, &summaries);
    assert_eq!(graph.len(), 3);
    assert_eq!(
        graph.render_tree(),
        "- Everything [A] (0 items)\n  - Music [B] (1 items)\n    - Live [C] (1 items)\n"
    );

    let exported = to_definition(&graph, "Chain", "", Provider::Google).unwrap();
    assert_eq!(exported.edges(), definition.edges());

    let parsed = Definition::from_json(&exported.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, exported);
}

#[test]
fn test_tree_edits_then_export() {
    let library = chain_library();
    let summaries: Vec<_> = library.iter().map(FullPlaylist::summary).collect();

    let (graph, a) = DependencyGraph::new().add_root(summaries[0].clone()).unwrap();
    let (graph, b) = graph.add_child(a, summaries[1].clone()).unwrap();
    let (graph, _) = graph.add_child(b, summaries[2].clone()).unwrap();

    // closing the loop back to A is refused, the old graph is untouched
    assert!(graph.add_child(b, summaries[0].clone()).is_err());
    assert_eq!(graph.len(), 3);

    // dropping B hands C to A
    let graph = graph.remove(b).unwrap();
    let exported = to_definition(&graph, "Flat", "", Provider::Google).unwrap();
    assert_eq!(exported.edges(), vec![("A".to_string(), "C".to_string())]);
}

#[test]
fn test_unknown_playlists_become_placeholders() {
    let graph = from_definition(&chain_definition(), &[]);
    assert_eq!(graph.len(), 3);
    assert!(graph.nodes().iter().all(|node| node.playlist.is_unknown()));
}
