use crate::model::PlaylistItem;
use serde::{Deserialize, Serialize};

/// Kind of change a step applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Copy an item from a dependency into its dependent
    AddItem,
}

/// One planned change against the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStep {
    #[serde(rename = "type")]
    pub kind: StepKind,

    /// Playlist receiving the item
    pub target_playlist_id: String,

    /// Item as it appears in the source playlist
    pub item: PlaylistItem,

    /// Dependency the item comes from
    pub source_playlist_id: String,
}

impl SyncStep {
    pub fn add_item(
        target_playlist_id: impl Into<String>,
        item: PlaylistItem,
        source_playlist_id: impl Into<String>,
    ) -> Self {
        Self {
            kind: StepKind::AddItem,
            target_playlist_id: target_playlist_id.into(),
            item,
            source_playlist_id: source_playlist_id.into(),
        }
    }
}
