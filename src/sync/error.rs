use super::quota::QuotaExceeded;
use crate::repository::RepoError;
use crate::structure::{DefinitionError, StructuralError};
use thiserror::Error;

/// Failures that abort a whole sync run
///
/// Individual step failures are not errors; they are collected in the
/// run's [`SyncReport`](super::SyncReport).
///
/// Both [`SyncError::Parse`] and [`SyncError::Invalid`] report as
/// `parse_error` on the wire.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to parse definition: {0}")]
    Parse(#[from] DefinitionError),

    #[error("Invalid definition: {0}")]
    Invalid(#[from] StructuralError),

    #[error("Failed to fetch playlist {playlist_id}: {source}")]
    Fetch {
        playlist_id: String,
        source: RepoError,
    },

    #[error("Quota exceeded: {required} units required, limit is {limit}")]
    QuotaExceeded { required: u64, limit: u64 },

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl SyncError {
    /// Wire name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::Parse(_) | SyncError::Invalid(_) => "parse_error",
            SyncError::Fetch { .. } => "fetch_error",
            SyncError::QuotaExceeded { .. } => "quota_exceeded",
            SyncError::Unknown(_) => "unknown_error",
        }
    }
}

impl From<QuotaExceeded> for SyncError {
    fn from(e: QuotaExceeded) -> Self {
        SyncError::QuotaExceeded {
            required: e.required,
            limit: e.limit,
        }
    }
}
