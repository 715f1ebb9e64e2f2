//! Main sync pipeline orchestration

use super::config::SyncConfig;
use super::error::SyncError;
use super::events::{LogObserver, SyncEvent, SyncObserver};
use super::executor::StepExecutor;
use super::planner::{plan_sync_steps, SyncPlan};
use super::quota::QuotaGuard;
use super::report::SyncReport;
use crate::model::FullPlaylist;
use crate::repository::PlaylistRepository;
use crate::structure::Definition;
use crate::validation::validate_definition;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A plan that passed the quota check, ready to execute
#[derive(Debug, Clone)]
pub struct PreparedSync {
    pub plan: SyncPlan,

    /// Quota the plan will spend if every step is attempted
    pub quota_required: u64,
}

/// Main sync pipeline
///
/// One run goes parse -> fetch every referenced playlist -> plan ->
/// quota check -> execute, strictly one remote call at a time.
pub struct SyncPipeline<R: PlaylistRepository> {
    config: SyncConfig,
    repository: R,
    observer: Box<dyn SyncObserver>,
    cancel: Arc<AtomicBool>,
}

impl<R: PlaylistRepository> SyncPipeline<R> {
    /// Create a new sync pipeline that reports progress to the log
    pub fn new(config: SyncConfig, repository: R) -> Self {
        Self {
            config,
            repository,
            observer: Box::new(LogObserver),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Send progress events somewhere other than the log
    pub fn with_observer(mut self, observer: impl SyncObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Flag that stops a running sync before its next step when set
    ///
    /// The flag is cleared once the run it stopped has finished executing.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Run a sync from a raw definition document
    pub async fn sync(&self, raw_definition: &str) -> Result<SyncReport, SyncError> {
        self.guarded(async {
            let definition = Definition::from_json(raw_definition)?;
            self.run(&definition).await
        })
        .await
    }

    /// Run a sync from an already parsed definition
    pub async fn sync_definition(&self, definition: &Definition) -> Result<SyncReport, SyncError> {
        self.guarded(self.run(definition)).await
    }

    /// Plan and quota-check a run without executing any step
    pub async fn prepare(&self, definition: &Definition) -> Result<PreparedSync, SyncError> {
        self.guarded(self.prepare_inner(definition)).await
    }

    async fn run(&self, definition: &Definition) -> Result<SyncReport, SyncError> {
        let prepared = self.prepare_inner(definition).await?;

        log::info!("Executing {} step(s)", prepared.plan.len());
        let report = StepExecutor::new(&self.repository, self.config.unit_cost)
            .with_cancel_flag(&self.cancel)
            .execute(&prepared.plan.steps, self.observer.as_ref())
            .await;
        // A cancel request applies to one run only
        self.cancel.store(false, Ordering::SeqCst);

        self.observer.on_event(&SyncEvent::GeneratedReport(&report));
        Ok(report)
    }

    async fn prepare_inner(&self, definition: &Definition) -> Result<PreparedSync, SyncError> {
        validate_definition(definition)?;
        self.observer.on_event(&SyncEvent::ParsedDefinition(definition));

        let snapshots = self.fetch_snapshots(definition).await?;

        let plan = plan_sync_steps(definition, snapshots);
        self.observer.on_event(&SyncEvent::PlannedSteps(&plan.steps));

        let guard = QuotaGuard::from_config(&self.config);
        let quota_required = guard.required(plan.len());
        self.observer.on_event(&SyncEvent::CalculatedQuota(quota_required));

        if let Err(exceeded) = guard.check(plan.len()) {
            self.observer.on_event(&SyncEvent::QuotaExceeded {
                required: exceeded.required,
                limit: exceeded.limit,
            });
            return Err(exceeded.into());
        }

        Ok(PreparedSync {
            plan,
            quota_required,
        })
    }

    /// Fetch each referenced playlist once; any failure aborts the run
    async fn fetch_snapshots(
        &self,
        definition: &Definition,
    ) -> Result<HashMap<String, FullPlaylist>, SyncError> {
        let ids = definition.playlist_ids();
        log::info!("Fetching {} playlist(s)...", ids.len());

        let mut snapshots = HashMap::with_capacity(ids.len());
        for playlist_id in ids {
            let snapshot = self
                .repository
                .fetch_full_playlist(&playlist_id)
                .await
                .map_err(|source| SyncError::Fetch {
                    playlist_id: playlist_id.clone(),
                    source,
                })?;

            self.observer.on_event(&SyncEvent::FetchedPlaylist {
                playlist_id: &playlist_id,
                snapshot: &snapshot,
            });
            snapshots.insert(playlist_id, snapshot);
        }

        Ok(snapshots)
    }

    /// Turn a panic anywhere in the run into an `Unknown` error
    async fn guarded<T>(
        &self,
        future: impl Future<Output = Result<T, SyncError>>,
    ) -> Result<T, SyncError> {
        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!("Sync aborted unexpectedly: {}", message);
                Err(SyncError::Unknown(message))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
