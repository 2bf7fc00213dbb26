//! Throughput figures derived from counter snapshots.

use std::time::Duration;

/// Seconds in the 30-day month used for capacity projections.
pub const SECONDS_PER_MONTH: f64 = 86_400.0 * 30.0;

/// Counter values at one instant of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub elapsed: Duration,
    pub total_inserted: u64,
    pub total_cost: f64,
}

impl ProgressSnapshot {
    pub fn writes_per_second(&self) -> f64 {
        per_second(self.total_inserted as f64, self.elapsed)
    }

    pub fn cost_per_second(&self) -> f64 {
        per_second(self.total_cost, self.elapsed)
    }

    /// Cost units a month at the current rate, i.e. how many 1KB reads the
    /// observed throughput would buy over 30 days.
    pub fn projected_monthly_capacity(&self) -> f64 {
        self.cost_per_second() * SECONDS_PER_MONTH
    }
}

fn per_second(value: f64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        value / secs
    } else {
        0.0
    }
}

/// Outcome of benchmarking one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSummary {
    pub collection: String,
    pub worker_count: usize,
    /// Documents handed to workers after the even split.
    pub records_assigned: u64,
    /// Counter values read once after every worker finished.
    pub final_snapshot: ProgressSnapshot,
    /// Progress lines printed before the summary.
    pub progress_ticks: u64,
    pub throttled_writes: u64,
    pub failed_writes: u64,
}

impl BenchmarkSummary {
    pub fn total_inserted(&self) -> u64 {
        self.final_snapshot.total_inserted
    }

    pub fn total_cost(&self) -> f64 {
        self.final_snapshot.total_cost
    }
}
