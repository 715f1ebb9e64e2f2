//! Outcome of one sync run

use super::step::SyncStep;
use crate::repository::RepoError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A step that the remote service rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub step: SyncStep,
    pub error: RepoError,
}

/// Summary of an executed plan
///
/// A run with failed steps still produces a report: partial success is a
/// normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub total_steps: usize,
    pub successful_steps: usize,
    pub failed_steps: usize,

    /// Quota spent by attempted steps, successful or not
    pub quota_used: u64,

    pub errors: Vec<StepFailure>,

    /// Whether the run stopped early on request
    #[serde(default)]
    pub cancelled: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    /// Start an empty report for a plan of `total_steps` steps
    pub fn new(total_steps: usize) -> Self {
        let now = Utc::now();
        Self {
            total_steps,
            successful_steps: 0,
            failed_steps: 0,
            quota_used: 0,
            errors: Vec::new(),
            cancelled: false,
            started_at: now,
            finished_at: now,
        }
    }

    pub fn record_success(&mut self, unit_cost: u64) {
        self.successful_steps += 1;
        self.quota_used = self.quota_used.saturating_add(unit_cost);
    }

    pub fn record_failure(&mut self, step: SyncStep, error: RepoError, unit_cost: u64) {
        self.failed_steps += 1;
        self.quota_used = self.quota_used.saturating_add(unit_cost);
        self.errors.push(StepFailure { step, error });
    }

    /// Stamp the finish time
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    /// Steps that were attempted
    pub fn attempted_steps(&self) -> usize {
        self.successful_steps + self.failed_steps
    }

    /// Every planned step ran and succeeded
    pub fn is_complete_success(&self) -> bool {
        !self.cancelled && self.failed_steps == 0 && self.successful_steps == self.total_steps
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{}/{} steps succeeded, {} failed, {} quota units used",
            self.successful_steps, self.total_steps, self.failed_steps, self.quota_used
        );
        if self.cancelled {
            line.push_str(" (cancelled)");
        }
        line
    }
}
