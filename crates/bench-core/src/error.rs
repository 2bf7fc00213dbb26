//! Error types for benchmark runs.

use bench_store::StoreError;
use thiserror::Error;

/// Errors that abort a benchmark run.
///
/// Per-write failures are never surfaced here; workers absorb them.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Store setup (database / collection provisioning) failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// An insert worker task did not run to completion.
    #[error("Insert worker {worker_id} failed: {message}")]
    Worker { worker_id: usize, message: String },

    /// The progress reporter could not write its output.
    #[error("Progress reporter failed: {0}")]
    Reporter(String),
}
