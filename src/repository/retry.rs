//! Retry wrapper for repositories talking to rate-limited services

use super::traits::{PlaylistRepository, RepoError};
use crate::model::{FullPlaylist, PlaylistItem};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;

/// Backoff settings for transient repository failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: usize,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Set number of retries
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set delay bounds
    pub fn with_delays(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay = min;
        self.max_delay = max;
        self
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries)
    }
}

/// Repository decorator that retries rate-limited and unknown failures
///
/// Permanent failures (not found, forbidden, ...) are returned at once.
pub struct RetryingRepository<R> {
    inner: R,
    policy: RetryPolicy,
}

impl<R: PlaylistRepository> RetryingRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Get the wrapped repository
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: PlaylistRepository> PlaylistRepository for RetryingRepository<R> {
    async fn fetch_full_playlist(&self, playlist_id: &str) -> Result<FullPlaylist, RepoError> {
        (|| async { self.inner.fetch_full_playlist(playlist_id).await })
            .retry(self.policy.backoff())
            .when(RepoError::is_transient)
            .notify(|e: &RepoError, delay: Duration| {
                log::warn!("Fetching {} failed ({}), retrying in {:?}", playlist_id, e, delay);
            })
            .await
    }

    async fn add_playlist_item(
        &self,
        playlist_id: &str,
        external_item_id: &str,
    ) -> Result<PlaylistItem, RepoError> {
        (|| async {
            self.inner
                .add_playlist_item(playlist_id, external_item_id)
                .await
        })
        .retry(self.policy.backoff())
        .when(RepoError::is_transient)
        .notify(|e: &RepoError, delay: Duration| {
            log::warn!(
                "Adding {} to {} failed ({}), retrying in {:?}",
                external_item_id,
                playlist_id,
                e,
                delay
            );
        })
        .await
    }
}
