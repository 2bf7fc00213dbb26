//! Counters shared between insert workers and the progress reporter.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

use crate::metrics::ProgressSnapshot;

/// An `f64` accumulator stored as raw bits.
#[derive(Debug, Default)]
struct CostCell(AtomicU64);

impl CostCell {
    fn add(&self, cost: f64) {
        let _ = self
            .0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some((f64::from_bits(bits) + cost).to_bits())
            });
    }

    fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// Run-wide counters for one collection benchmark.
///
/// One cost cell exists per worker, created up front, so workers never
/// contend on cost accumulation. The inserted count is a single atomic.
#[derive(Debug)]
pub struct SharedCounters {
    total_inserted: AtomicU64,
    cost_by_worker: Box<[CostCell]>,
    active_workers: AtomicUsize,
    all_finished: Notify,
}

impl SharedCounters {
    /// Counters for `worker_count` workers, all of them active.
    pub fn new(worker_count: usize) -> Self {
        Self {
            total_inserted: AtomicU64::new(0),
            cost_by_worker: (0..worker_count).map(|_| CostCell::default()).collect(),
            active_workers: AtomicUsize::new(worker_count),
            all_finished: Notify::new(),
        }
    }

    pub fn record_inserted(&self) {
        self.total_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// Add `cost` to a worker's running total. Unknown ids are ignored.
    pub fn add_cost(&self, worker_id: usize, cost: f64) {
        if let Some(cell) = self.cost_by_worker.get(worker_id) {
            cell.add(cost);
        }
    }

    pub fn total_inserted(&self) -> u64 {
        self.total_inserted.load(Ordering::Relaxed)
    }

    pub fn worker_cost(&self, worker_id: usize) -> f64 {
        self.cost_by_worker
            .get(worker_id)
            .map(CostCell::get)
            .unwrap_or(0.0)
    }

    /// Sum of every worker's cost.
    pub fn total_cost(&self) -> f64 {
        self.cost_by_worker.iter().map(CostCell::get).sum()
    }

    pub fn active_workers(&self) -> usize {
        // Acquire pairs with the release in `worker_finished`: once this
        // reads zero, every worker's counter updates are visible.
        self.active_workers.load(Ordering::Acquire)
    }

    /// Mark one worker as finished and return the remaining active count.
    ///
    /// Saturates at zero. The transition to zero wakes [`Self::wait_all_finished`].
    pub fn worker_finished(&self) -> usize {
        match self
            .active_workers
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        {
            Ok(1) => {
                self.all_finished.notify_one();
                0
            }
            Ok(previous) => previous - 1,
            Err(_) => 0,
        }
    }

    /// Resolves once the last worker has finished.
    ///
    /// Callers must check [`Self::active_workers`] first; with no workers
    /// there is nothing to wake this.
    pub async fn wait_all_finished(&self) {
        self.all_finished.notified().await;
    }

    pub fn snapshot(&self, elapsed: Duration) -> ProgressSnapshot {
        ProgressSnapshot {
            elapsed,
            total_inserted: self.total_inserted(),
            total_cost: self.total_cost(),
        }
    }
}
