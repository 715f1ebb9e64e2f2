//! Local JSON playlist library
//!
//! Serves playlists from a JSON document of the form
//! `{"playlists": [{"id": ..., "title": ..., "items": [...]}]}` and applies
//! added items in memory until [`LibraryFileRepository::save`] is called.

use super::traits::{PlaylistRepository, RepoError, RepoErrorStatus};
use crate::model::{FullPlaylist, Playlist, PlaylistItem};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// On-disk layout of a library file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryFile {
    pub playlists: Vec<FullPlaylist>,
}

/// Playlist repository backed by an in-memory copy of a library file
pub struct LibraryFileRepository {
    playlists: Mutex<Vec<FullPlaylist>>,
}

impl LibraryFileRepository {
    /// Create a repository holding the given playlists
    pub fn new(playlists: Vec<FullPlaylist>) -> Self {
        Self {
            playlists: Mutex::new(playlists),
        }
    }

    /// Load a library file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read playlist library: {:?}", path))?;
        let library: LibraryFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse playlist library: {:?}", path))?;

        log::info!(
            "Loaded playlist library: {} playlists from {:?}",
            library.playlists.len(),
            path
        );
        Ok(Self::new(library.playlists))
    }

    /// Write the current library state back to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        let library = LibraryFile {
            playlists: self.lock()?.clone(),
        };
        let json = serde_json::to_string_pretty(&library)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write playlist library: {:?}", path))?;

        log::info!("Playlist library written to: {:?}", path);
        Ok(())
    }

    /// Copy of every playlist in the library
    pub fn playlists(&self) -> Vec<FullPlaylist> {
        self.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    /// Summaries of every playlist, for resolving tree nodes
    pub fn summaries(&self) -> Vec<Playlist> {
        self.playlists().iter().map(FullPlaylist::summary).collect()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<FullPlaylist>>, RepoError> {
        self.playlists
            .lock()
            .map_err(|_| RepoError::new(RepoErrorStatus::Unknown, "library lock poisoned"))
    }
}

#[async_trait]
impl PlaylistRepository for LibraryFileRepository {
    async fn fetch_full_playlist(&self, playlist_id: &str) -> Result<FullPlaylist, RepoError> {
        let playlists = self.lock()?;
        playlists
            .iter()
            .find(|playlist| playlist.id == playlist_id)
            .cloned()
            .ok_or_else(|| RepoError::not_found(format!("playlist {} not found", playlist_id)))
    }

    async fn add_playlist_item(
        &self,
        playlist_id: &str,
        external_item_id: &str,
    ) -> Result<PlaylistItem, RepoError> {
        let mut playlists = self.lock()?;

        // Reuse metadata from any playlist that already holds this item
        let known = playlists
            .iter()
            .flat_map(|playlist| playlist.items.iter())
            .find(|item| item.external_item_id == external_item_id)
            .cloned();

        let target = playlists
            .iter_mut()
            .find(|playlist| playlist.id == playlist_id)
            .ok_or_else(|| RepoError::not_found(format!("playlist {} not found", playlist_id)))?;

        let item = PlaylistItem {
            id: Uuid::new_v4().to_string(),
            external_item_id: external_item_id.to_string(),
            title: known.as_ref().map(|i| i.title.clone()).unwrap_or_default(),
            author: known.and_then(|i| i.author),
            position: 0,
        };

        log::debug!("Adding {} to playlist {}", external_item_id, playlist_id);
        Ok(target.push_item(item).clone())
    }
}
