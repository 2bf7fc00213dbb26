//! Insert workers.

use std::sync::Arc;

use bench_generator::RecordingGenerator;
use bench_store::{CollectionHandle, StoreGateway, WriteOutcome};
use tracing::{debug, error};

use crate::counters::SharedCounters;
use crate::partition::WorkAssignment;

/// Per-worker tallies returned when a worker finishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub succeeded: u64,
    pub throttled: u64,
    pub failed: u64,
    pub cost: f64,
}

/// Marks its worker finished in [`SharedCounters`] when dropped, so the
/// active count drops even if the worker's task panics or is cancelled.
struct ActiveWorkerGuard {
    counters: Arc<SharedCounters>,
}

impl Drop for ActiveWorkerGuard {
    fn drop(&mut self) {
        let remaining = self.counters.worker_finished();
        debug!(remaining, "Insert worker finished");
    }
}

/// Writes one assignment's worth of generated records, one at a time.
pub struct InsertWorker {
    assignment: WorkAssignment,
    generator: RecordingGenerator,
    gateway: Arc<dyn StoreGateway>,
    collection: Arc<CollectionHandle>,
    counters: Arc<SharedCounters>,
}

impl InsertWorker {
    pub fn new(
        assignment: WorkAssignment,
        generator: RecordingGenerator,
        gateway: Arc<dyn StoreGateway>,
        collection: Arc<CollectionHandle>,
        counters: Arc<SharedCounters>,
    ) -> Self {
        Self {
            assignment,
            generator,
            gateway,
            collection,
            counters,
        }
    }

    /// Run to completion.
    ///
    /// Successful writes add their charge to this worker's cost cell and
    /// count as inserted. Throttled writes also count as inserted, with no
    /// cost. Other failures are logged and not counted.
    pub async fn run(mut self) -> WorkerReport {
        let _guard = ActiveWorkerGuard {
            counters: self.counters.clone(),
        };
        let worker_id = self.assignment.worker_id;
        let mut report = WorkerReport {
            worker_id,
            ..WorkerReport::default()
        };

        for _ in 0..self.assignment.records_to_write {
            let record = self.generator.generate();
            let outcome = self.gateway.create_record(&self.collection, &record).await;

            match outcome {
                WriteOutcome::Success { request_charge } => {
                    self.counters.add_cost(worker_id, request_charge);
                    self.counters.record_inserted();
                    report.succeeded += 1;
                    report.cost += request_charge;
                }
                WriteOutcome::Throttled { .. } => {
                    self.counters.record_inserted();
                    report.throttled += 1;
                    debug!(worker_id, %outcome, "Write throttled");
                }
                WriteOutcome::Failed { .. } => {
                    report.failed += 1;
                    let document = serde_json::to_string(&record)
                        .unwrap_or_else(|e| format!("<unserializable record: {e}>"));
                    error!("Failed to write {document}. Error was {outcome}");
                }
            }
        }

        debug!(
            worker_id,
            succeeded = report.succeeded,
            throttled = report.throttled,
            failed = report.failed,
            "Insert worker done"
        );
        report
    }
}
