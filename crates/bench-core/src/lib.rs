//! Concurrent insert driver for docdb-bench.
//!
//! A benchmark run against one collection looks like this:
//!
//! ```text
//!                    ┌──────────────────────┐
//!                    │      Benchmark       │  ensure database / collection,
//!                    │    (orchestrator)    │  partition the document count
//!                    └──────────┬───────────┘
//!             spawn N           │            spawn 1
//!        ┌───────────────┬──────┴────────┐──────────────────┐
//!        ▼               ▼               ▼                  ▼
//!  ┌───────────┐   ┌───────────┐   ┌───────────┐   ┌──────────────────┐
//!  │ worker 0  │   │ worker 1  │...│ worker N-1│   │ ProgressReporter │
//!  └─────┬─────┘   └─────┬─────┘   └─────┬─────┘   └────────┬─────────┘
//!        │ inserted += 1, cost[id] += c  │        reads once│per interval
//!        └───────────────┴───────┬───────┘                  │
//!                                ▼                          │
//!                     ┌─────────────────────┐               │
//!                     │   SharedCounters    │◄──────────────┘
//!                     └─────────────────────┘
//! ```
//!
//! The reporter stops once the active worker count reaches zero and prints
//! the final summary; the orchestrator returns after joining every worker and
//! the reporter.

pub mod benchmark;
pub mod config;
pub mod counters;
pub mod error;
pub mod metrics;
pub mod partition;
pub mod report;
pub mod reporter;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use benchmark::Benchmark;
pub use config::{BenchmarkSettings, CollectionSettings, Parallelism};
pub use counters::SharedCounters;
pub use error::BenchError;
pub use metrics::{BenchmarkSummary, ProgressSnapshot};
pub use partition::{auto_worker_count, partition_work, worker_count, RunPlan, WorkAssignment};
pub use reporter::{ProgressReporter, ReporterOutcome};
pub use worker::{InsertWorker, WorkerReport};
