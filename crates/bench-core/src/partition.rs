//! Worker count selection and work partitioning.

use crate::config::Parallelism;

/// Provisioned throughput that justifies one auto-selected worker.
pub const THROUGHPUT_PER_WORKER: u32 = 100;

/// Upper bound on auto-selected workers.
pub const MAX_AUTO_WORKERS: usize = 250;

/// The share of a run given to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkAssignment {
    pub worker_id: usize,
    pub records_to_write: u64,
}

/// One worker per 100 units of throughput, between 1 and 250.
pub fn auto_worker_count(throughput: u32) -> usize {
    ((throughput / THROUGHPUT_PER_WORKER) as usize).clamp(1, MAX_AUTO_WORKERS)
}

/// Resolve the worker count for a collection.
pub fn worker_count(parallelism: Parallelism, throughput: u32) -> usize {
    match parallelism {
        Parallelism::Auto => auto_worker_count(throughput),
        Parallelism::Fixed(n) => n,
    }
}

/// Split `total` evenly across `worker_count` workers.
///
/// Each worker gets `total / worker_count`; the remainder is dropped, so up
/// to `worker_count - 1` documents are never written. A worker count of zero
/// yields no assignments.
pub fn partition_work(total: u64, worker_count: usize) -> Vec<WorkAssignment> {
    if worker_count == 0 {
        return Vec::new();
    }
    let share = total / worker_count as u64;
    (0..worker_count)
        .map(|worker_id| WorkAssignment {
            worker_id,
            records_to_write: share,
        })
        .collect()
}

/// Resolved plan for benchmarking one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub worker_count: usize,
    pub assignments: Vec<WorkAssignment>,
}

impl RunPlan {
    pub fn new(parallelism: Parallelism, total: u64, throughput: u32) -> Self {
        let worker_count = worker_count(parallelism, throughput);
        Self {
            worker_count,
            assignments: partition_work(total, worker_count),
        }
    }

    /// Documents that will actually be attempted.
    pub fn records_assigned(&self) -> u64 {
        self.assignments.iter().map(|a| a.records_to_write).sum()
    }

    /// Documents lost to integer division.
    pub fn records_dropped(&self, total: u64) -> u64 {
        total.saturating_sub(self.records_assigned())
    }
}

/// Describe a plan for logging.
pub fn describe_plan(plan: &RunPlan, total: u64) -> String {
    let per_worker = plan
        .assignments
        .first()
        .map(|a| a.records_to_write)
        .unwrap_or(0);
    let mut description = format!(
        "{} workers x {} documents = {} of {} requested",
        plan.worker_count,
        per_worker,
        plan.records_assigned(),
        total
    );
    let dropped = plan.records_dropped(total);
    if dropped > 0 {
        description.push_str(&format!(" ({dropped} dropped by even split)"));
    }
    description
}
