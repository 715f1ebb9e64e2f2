//! Sync configuration

/// Remote quota units charged per add-item call
///
/// Matches the cost of a playlist insert on the YouTube Data API.
pub const DEFAULT_UNIT_COST: u64 = 50;

/// Daily quota budget available to one sync run
pub const DEFAULT_QUOTA_LIMIT: u64 = 10_000;

/// Configuration for a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Quota units charged per planned step
    pub unit_cost: u64,

    /// Hard ceiling on the quota one run may need
    pub quota_limit: u64,
}

impl SyncConfig {
    /// Create a configuration with the default quota model
    pub fn new() -> Self {
        Self {
            unit_cost: DEFAULT_UNIT_COST,
            quota_limit: DEFAULT_QUOTA_LIMIT,
        }
    }

    /// Set cost per step
    pub fn with_unit_cost(mut self, unit_cost: u64) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    /// Set quota ceiling
    pub fn with_quota_limit(mut self, quota_limit: u64) -> Self {
        self.quota_limit = quota_limit;
        self
    }

    /// Largest number of steps that fits in the budget
    pub fn max_steps(&self) -> u64 {
        if self.unit_cost == 0 {
            u64::MAX
        } else {
            self.quota_limit / self.unit_cost
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}
