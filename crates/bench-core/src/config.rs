//! Settings consumed by the benchmark orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::reporter::DEFAULT_PROGRESS_INTERVAL;

/// How many insert workers to run.
///
/// Configured as an integer where `-1` means [`Parallelism::Auto`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Parallelism {
    /// Derive the worker count from the collection's provisioned throughput.
    Auto,
    /// Run exactly this many workers.
    Fixed(usize),
}

impl Parallelism {
    /// Configuration value that selects [`Parallelism::Auto`].
    pub const AUTO: i64 = -1;
}

impl TryFrom<i64> for Parallelism {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            Parallelism::AUTO => Ok(Parallelism::Auto),
            n if n > 0 => usize::try_from(n)
                .map(Parallelism::Fixed)
                .map_err(|_| format!("degree of parallelism {n} is too large")),
            other => Err(format!(
                "degree of parallelism must be -1 (auto) or positive, got {other}"
            )),
        }
    }
}

impl From<Parallelism> for i64 {
    fn from(value: Parallelism) -> Self {
        match value {
            Parallelism::Auto => Parallelism::AUTO,
            Parallelism::Fixed(n) => n as i64,
        }
    }
}

impl fmt::Display for Parallelism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parallelism::Auto => write!(f, "auto"),
            Parallelism::Fixed(n) => write!(f, "{n}"),
        }
    }
}

/// Run-wide benchmark settings.
#[derive(Debug, Clone)]
pub struct BenchmarkSettings {
    /// Database every collection lives in.
    pub database: String,
    pub parallelism: Parallelism,
    /// Documents to insert per collection, split across workers.
    pub documents_to_insert: u64,
    /// Base seed; worker `i` generates records from `seed + i`.
    pub seed: u64,
    /// Period between progress lines.
    pub progress_interval: Duration,
}

impl BenchmarkSettings {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            parallelism: Parallelism::Auto,
            documents_to_insert: 0,
            seed: 42,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_documents(mut self, count: u64) -> Self {
        self.documents_to_insert = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }
}

/// One collection to benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSettings {
    pub id: String,
    /// Partition key paths, e.g. `/deviceId`.
    pub partition_keys: Vec<String>,
    /// Provisioned throughput in cost units per second.
    pub throughput: u32,
}

impl CollectionSettings {
    pub fn new(id: impl Into<String>, partition_key: impl Into<String>, throughput: u32) -> Self {
        Self {
            id: id.into(),
            partition_keys: vec![partition_key.into()],
            throughput,
        }
    }
}
