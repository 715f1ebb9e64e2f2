//! Playlist data model
//!
//! This module defines the playlist shapes shared by the dependency
//! tree, the sync engine and repository implementations.

mod playlist;
mod provider;

pub use playlist::{FullPlaylist, Playlist, PlaylistItem, UNKNOWN_PLAYLIST_TITLE};
pub use provider::Provider;
