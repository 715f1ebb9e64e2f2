//! Sync orchestration
//!
//! Copies items each playlist is missing from its dependencies, within a
//! fixed quota budget, tolerating individual step failures.

pub mod config;
mod error;
mod events;
mod executor;
pub mod pipeline;
mod planner;
mod quota;
mod report;
mod step;

pub use config::SyncConfig;
pub use error::SyncError;
pub use events::{LogObserver, NoopObserver, SyncEvent, SyncObserver};
pub use executor::StepExecutor;
pub use pipeline::{PreparedSync, SyncPipeline};
pub use planner::{plan_sync_steps, SyncPlan};
pub use quota::{QuotaExceeded, QuotaGuard};
pub use report::{StepFailure, SyncReport};
pub use step::{StepKind, SyncStep};
