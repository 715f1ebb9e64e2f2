#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use structured_playlist::model::{FullPlaylist, PlaylistItem};
use structured_playlist::repository::{PlaylistRepository, RepoError, RepoErrorStatus};
use structured_playlist::sync::SyncEvent;

/// Create a playlist whose items have the given external IDs
pub fn playlist(id: &str, externals: &[&str]) -> FullPlaylist {
    let mut playlist = FullPlaylist::new(id, format!("Playlist {}", id));
    for (i, external) in externals.iter().enumerate() {
        playlist.push_item(PlaylistItem {
            id: format!("{}-item-{}", id, i),
            external_item_id: external.to_string(),
            title: format!("Video {}", external),
            author: None,
            position: 0,
        });
    }
    playlist
}

/// In-memory repository with scripted failures
#[derive(Default)]
pub struct ScriptedRepository {
    playlists: Mutex<HashMap<String, FullPlaylist>>,
    failing_fetches: HashSet<String>,
    /// 1-based add call numbers that fail
    failing_adds: HashSet<usize>,
    panic_on_fetch: bool,
    fetches: Mutex<Vec<String>>,
    adds: Mutex<Vec<(String, String)>>,
    add_counter: AtomicUsize,
}

impl ScriptedRepository {
    pub fn new(playlists: Vec<FullPlaylist>) -> Self {
        Self {
            playlists: Mutex::new(playlists.into_iter().map(|p| (p.id.clone(), p)).collect()),
            ..Default::default()
        }
    }

    pub fn failing_fetch(mut self, playlist_id: &str) -> Self {
        self.failing_fetches.insert(playlist_id.to_string());
        self
    }

    pub fn failing_add(mut self, call: usize) -> Self {
        self.failing_adds.insert(call);
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic_on_fetch = true;
        self
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn adds(&self) -> Vec<(String, String)> {
        self.adds.lock().unwrap().clone()
    }

    pub fn items_of(&self, playlist_id: &str) -> Vec<String> {
        self.playlists.lock().unwrap()[playlist_id]
            .items
            .iter()
            .map(|item| item.external_item_id.clone())
            .collect()
    }
}

#[async_trait]
impl PlaylistRepository for ScriptedRepository {
    async fn fetch_full_playlist(&self, playlist_id: &str) -> Result<FullPlaylist, RepoError> {
        if self.panic_on_fetch {
            panic!("repository exploded");
        }

        self.fetches.lock().unwrap().push(playlist_id.to_string());
        if self.failing_fetches.contains(playlist_id) {
            return Err(RepoError::new(RepoErrorStatus::Forbidden, "private playlist"));
        }

        self.playlists
            .lock()
            .unwrap()
            .get(playlist_id)
            .cloned()
            .ok_or_else(|| RepoError::not_found(playlist_id.to_string()))
    }

    async fn add_playlist_item(
        &self,
        playlist_id: &str,
        external_item_id: &str,
    ) -> Result<PlaylistItem, RepoError> {
        let call = self.add_counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.adds
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), external_item_id.to_string()));

        if self.failing_adds.contains(&call) {
            return Err(RepoError::new(RepoErrorStatus::Conflict, "rejected"));
        }

        let mut playlists = self.playlists.lock().unwrap();
        let target = playlists
            .get_mut(playlist_id)
            .ok_or_else(|| RepoError::not_found(playlist_id.to_string()))?;
        let item = PlaylistItem {
            id: format!("added-{}", call),
            external_item_id: external_item_id.to_string(),
            title: String::new(),
            author: None,
            position: 0,
        };
        Ok(target.push_item(item).clone())
    }
}

/// Observer that records event names
pub fn recorder() -> (
    Arc<Mutex<Vec<String>>>,
    impl Fn(&SyncEvent<'_>) + Send + Sync + 'static,
) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let observer = move |event: &SyncEvent<'_>| {
        sink.lock().unwrap().push(event.name().to_string());
    };
    (events, observer)
}
