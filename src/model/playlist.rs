use serde::{Deserialize, Serialize};

/// Title given to playlists that are referenced but could not be resolved
pub const UNKNOWN_PLAYLIST_TITLE: &str = "unknown";

/// Playlist summary as shown in the dependency tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Provider playlist ID
    pub id: String,

    /// Playlist title
    pub title: String,

    /// Thumbnail image URL (may be empty)
    #[serde(default)]
    pub thumbnail_url: String,

    /// Number of items reported by the provider
    #[serde(default)]
    pub items_total: u32,

    /// Public URL of the playlist (may be empty)
    #[serde(default)]
    pub url: String,
}

impl Playlist {
    /// Create a playlist summary with no thumbnail or URL
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail_url: String::new(),
            items_total: 0,
            url: String::new(),
        }
    }

    /// Placeholder for a playlist that is referenced but inaccessible
    ///
    /// Keeps the tree renderable when a dependency was deleted upstream
    /// or the current user lost access to it.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::new(id, UNKNOWN_PLAYLIST_TITLE)
    }

    /// Whether this is a placeholder produced by [`Playlist::unknown`]
    pub fn is_unknown(&self) -> bool {
        self.title == UNKNOWN_PLAYLIST_TITLE && self.items_total == 0
    }
}

/// Entry in a remote playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    /// Provider ID of the playlist entry itself
    pub id: String,

    /// ID of the underlying video/track (shared across playlists)
    pub external_item_id: String,

    /// Item title
    #[serde(default)]
    pub title: String,

    /// Channel or artist name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Position in the playlist (0-based)
    #[serde(default)]
    pub position: u32,
}

/// A playlist together with all of its items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullPlaylist {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub thumbnail_url: String,

    #[serde(default)]
    pub url: String,

    /// Playlist items (ordered)
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

impl FullPlaylist {
    /// Create a new empty playlist
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail_url: String::new(),
            url: String::new(),
            items: Vec::new(),
        }
    }

    /// Whether an item with this external ID is already in the playlist
    pub fn contains_external(&self, external_item_id: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.external_item_id == external_item_id)
    }

    /// Append an item, assigning its position
    pub fn push_item(&mut self, mut item: PlaylistItem) -> &PlaylistItem {
        item.position = self.items.len() as u32;
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Summary of this playlist for use in a dependency tree
    pub fn summary(&self) -> Playlist {
        Playlist {
            id: self.id.clone(),
            title: self.title.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            items_total: self.items.len() as u32,
            url: self.url.clone(),
        }
    }

    /// Number of items in this playlist
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, external: &str) -> PlaylistItem {
        PlaylistItem {
            id: id.to_string(),
            external_item_id: external.to_string(),
            title: format!("Video {}", external),
            author: None,
            position: 0,
        }
    }

    #[test]
    fn test_push_item_assigns_positions() {
        let mut playlist = FullPlaylist::new("PL1", "Mix");
        playlist.push_item(item("a", "v1"));
        playlist.push_item(item("b", "v2"));

        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.items[1].position, 1);
        assert!(playlist.contains_external("v2"));
        assert!(!playlist.contains_external("v3"));
    }

    #[test]
    fn test_summary_counts_items() {
        let mut playlist = FullPlaylist::new("PL1", "Mix");
        playlist.push_item(item("a", "v1"));

        let summary = playlist.summary();
        assert_eq!(summary.id, "PL1");
        assert_eq!(summary.items_total, 1);
        assert!(!summary.is_unknown());
    }

    #[test]
    fn test_unknown_placeholder() {
        let placeholder = Playlist::unknown("gone");
        assert_eq!(placeholder.title, UNKNOWN_PLAYLIST_TITLE);
        assert_eq!(placeholder.items_total, 0);
        assert!(placeholder.is_unknown());
    }

    #[test]
    fn test_item_wire_names_are_camel_case() {
        let json = serde_json::to_value(item("a", "v1")).unwrap();
        assert_eq!(json["externalItemId"], "v1");
        assert!(json.get("author").is_none());
    }
}
