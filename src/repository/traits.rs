//! Repository trait definitions and error types

use crate::model::{FullPlaylist, PlaylistItem};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Remote playlist service - allows swapping between real providers,
/// local library files and test doubles
#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    /// Fetch a playlist together with every one of its items
    async fn fetch_full_playlist(&self, playlist_id: &str) -> Result<FullPlaylist, RepoError>;

    /// Append the item identified by `external_item_id` to a playlist
    async fn add_playlist_item(
        &self,
        playlist_id: &str,
        external_item_id: &str,
    ) -> Result<PlaylistItem, RepoError>;
}

#[async_trait]
impl<R: PlaylistRepository + ?Sized> PlaylistRepository for std::sync::Arc<R> {
    async fn fetch_full_playlist(&self, playlist_id: &str) -> Result<FullPlaylist, RepoError> {
        (**self).fetch_full_playlist(playlist_id).await
    }

    async fn add_playlist_item(
        &self,
        playlist_id: &str,
        external_item_id: &str,
    ) -> Result<PlaylistItem, RepoError> {
        (**self).add_playlist_item(playlist_id, external_item_id).await
    }
}

/// Fixed set of failure statuses a repository may report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoErrorStatus {
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    RateLimited,
    Validation,
    Unknown,
}

impl RepoErrorStatus {
    /// Map an HTTP status code onto the repository status set
    pub fn from_http(code: u16) -> Self {
        match code {
            401 => RepoErrorStatus::Unauthorized,
            403 => RepoErrorStatus::Forbidden,
            404 => RepoErrorStatus::NotFound,
            409 => RepoErrorStatus::Conflict,
            429 => RepoErrorStatus::RateLimited,
            400 | 422 => RepoErrorStatus::Validation,
            _ => RepoErrorStatus::Unknown,
        }
    }

    /// Whether retrying the same request later might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, RepoErrorStatus::RateLimited | RepoErrorStatus::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepoErrorStatus::Unauthorized => "unauthorized",
            RepoErrorStatus::Forbidden => "forbidden",
            RepoErrorStatus::NotFound => "not_found",
            RepoErrorStatus::Conflict => "conflict",
            RepoErrorStatus::RateLimited => "rate_limited",
            RepoErrorStatus::Validation => "validation",
            RepoErrorStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RepoErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a playlist repository
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{status}: {message}")]
pub struct RepoError {
    pub status: RepoErrorStatus,
    pub message: String,
}

impl RepoError {
    pub fn new(status: RepoErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RepoErrorStatus::NotFound, message)
    }

    pub fn is_transient(&self) -> bool {
        self.status.is_transient()
    }
}
