//! Sequential execution of planned steps

use super::events::{SyncEvent, SyncObserver};
use super::report::SyncReport;
use super::step::SyncStep;
use crate::repository::PlaylistRepository;
use std::sync::atomic::{AtomicBool, Ordering};

/// Runs steps one at a time against a repository
///
/// A failed step is recorded and execution moves on to the next one.
pub struct StepExecutor<'a, R: PlaylistRepository + ?Sized> {
    repository: &'a R,
    unit_cost: u64,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, R: PlaylistRepository + ?Sized> StepExecutor<'a, R> {
    pub fn new(repository: &'a R, unit_cost: u64) -> Self {
        Self {
            repository,
            unit_cost,
            cancel: None,
        }
    }

    /// Stop before the next step once `flag` is set
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Execute every step in order and report the outcome
    pub async fn execute(&self, steps: &[SyncStep], observer: &dyn SyncObserver) -> SyncReport {
        let total = steps.len();
        let mut report = SyncReport::new(total);

        for (index, step) in steps.iter().enumerate() {
            if self.is_cancelled() {
                log::warn!("Sync cancelled after {} of {} steps", index, total);
                report.cancelled = true;
                break;
            }

            observer.on_event(&SyncEvent::ExecutingStep { step, index, total });

            let result = self
                .repository
                .add_playlist_item(&step.target_playlist_id, &step.item.external_item_id)
                .await;
            let succeeded = result.is_ok();

            match result {
                Ok(added) => {
                    log::debug!(
                        "Added {} to {} as {}",
                        step.item.external_item_id,
                        step.target_playlist_id,
                        added.id
                    );
                    report.record_success(self.unit_cost);
                }
                Err(e) => {
                    log::warn!(
                        "Failed to add {} to {}: {}",
                        step.item.external_item_id,
                        step.target_playlist_id,
                        e
                    );
                    report.record_failure(step.clone(), e, self.unit_cost);
                }
            }

            observer.on_event(&SyncEvent::ExecutedStep {
                step,
                index,
                total,
                succeeded,
            });
        }

        report.finish();
        report
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .map(|flag| flag.load(Ordering::SeqCst))
            .unwrap_or(false)
    }
}
