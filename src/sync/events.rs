//! Progress notifications emitted during a sync run

use super::report::SyncReport;
use super::step::SyncStep;
use crate::model::FullPlaylist;
use crate::structure::Definition;

/// Progress of a sync run, in the order the events occur
#[derive(Debug, Clone, Copy)]
pub enum SyncEvent<'a> {
    ParsedDefinition(&'a Definition),
    FetchedPlaylist {
        playlist_id: &'a str,
        snapshot: &'a FullPlaylist,
    },
    PlannedSteps(&'a [SyncStep]),
    CalculatedQuota(u64),
    QuotaExceeded {
        required: u64,
        limit: u64,
    },
    /// `index` is 0-based
    ExecutingStep {
        step: &'a SyncStep,
        index: usize,
        total: usize,
    },
    ExecutedStep {
        step: &'a SyncStep,
        index: usize,
        total: usize,
        succeeded: bool,
    },
    GeneratedReport(&'a SyncReport),
}

impl SyncEvent<'_> {
    /// Stable event name, e.g. for progress UIs
    pub fn name(&self) -> &'static str {
        match self {
            SyncEvent::ParsedDefinition(_) => "parsed-definition",
            SyncEvent::FetchedPlaylist { .. } => "fetched-playlist",
            SyncEvent::PlannedSteps(_) => "planned-steps",
            SyncEvent::CalculatedQuota(_) => "calculated-quota",
            SyncEvent::QuotaExceeded { .. } => "quota-exceeded",
            SyncEvent::ExecutingStep { .. } => "executing-step",
            SyncEvent::ExecutedStep { .. } => "executed-step",
            SyncEvent::GeneratedReport(_) => "generated-report",
        }
    }
}

/// Receives progress notifications from a sync run
pub trait SyncObserver: Send + Sync {
    fn on_event(&self, event: &SyncEvent<'_>);
}

impl<F> SyncObserver for F
where
    F: Fn(&SyncEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &SyncEvent<'_>) {
        self(event)
    }
}

/// Ignores every event
pub struct NoopObserver;

impl SyncObserver for NoopObserver {
    fn on_event(&self, _event: &SyncEvent<'_>) {}
}

/// Forwards events to the log
pub struct LogObserver;

impl SyncObserver for LogObserver {
    fn on_event(&self, event: &SyncEvent<'_>) {
        match event {
            SyncEvent::ParsedDefinition(definition) => {
                log::info!(
                    "Definition '{}' loaded: {} top-level playlist(s)",
                    definition.name,
                    definition.playlists.len()
                );
            }
            SyncEvent::FetchedPlaylist {
                playlist_id,
                snapshot,
            } => {
                log::info!(
                    "Fetched {} ({}): {} items",
                    snapshot.title,
                    playlist_id,
                    snapshot.len()
                );
            }
            SyncEvent::PlannedSteps(steps) => {
                log::info!("{} step(s) planned", steps.len());
            }
            SyncEvent::CalculatedQuota(amount) => {
                log::info!("Quota required: {} units", amount);
            }
            SyncEvent::QuotaExceeded { required, limit } => {
                log::error!("Quota exceeded: {} units required, limit is {}", required, limit);
            }
            SyncEvent::ExecutingStep { step, index, total } => {
                log::info!(
                    "[{}/{}] Adding: {} ({}) -> {}",
                    index + 1,
                    total,
                    step.item.title,
                    step.item.external_item_id,
                    step.target_playlist_id
                );
            }
            SyncEvent::ExecutedStep {
                index,
                total,
                succeeded,
                ..
            } => {
                log::debug!(
                    "[{}/{}] {}",
                    index + 1,
                    total,
                    if *succeeded { "done" } else { "failed" }
                );
            }
            SyncEvent::GeneratedReport(report) => {
                log::info!("Sync finished: {}", report.summary());
            }
        }
    }
}
