//! Pre-flight quota check

use super::config::SyncConfig;
use thiserror::Error;

/// Raised when a plan needs more quota than a run may spend
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("quota exceeded: {required} units required, limit is {limit}")]
pub struct QuotaExceeded {
    pub required: u64,
    pub limit: u64,
}

/// Refuses plans whose total cost is over budget before anything runs
#[derive(Debug, Clone, Copy)]
pub struct QuotaGuard {
    unit_cost: u64,
    limit: u64,
}

impl QuotaGuard {
    pub fn new(unit_cost: u64, limit: u64) -> Self {
        Self { unit_cost, limit }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.unit_cost, config.quota_limit)
    }

    /// Quota needed to run `step_count` steps
    pub fn required(&self, step_count: usize) -> u64 {
        (step_count as u64).saturating_mul(self.unit_cost)
    }

    /// Check a plan of `step_count` steps, returning the quota it needs
    pub fn check(&self, step_count: usize) -> Result<u64, QuotaExceeded> {
        let required = self.required(step_count);
        if required > self.limit {
            return Err(QuotaExceeded {
                required,
                limit: self.limit,
            });
        }
        Ok(required)
    }

    pub fn unit_cost(&self) -> u64 {
        self.unit_cost
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}
