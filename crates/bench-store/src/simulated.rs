//! In-process store used for dry runs and tests.

use crate::error::StoreError;
use crate::gateway::{validate_partition_keys, CollectionHandle, DatabaseHandle, StoreGateway};
use crate::outcome::WriteOutcome;
use async_trait::async_trait;
use bench_generator::DeviceRecording;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Cost charged per write when none is configured; roughly what a 1KB
/// document insert costs on a provisioned-throughput store.
pub const DEFAULT_REQUEST_CHARGE: f64 = 5.0;

/// Status code reported for throttled writes.
pub const THROTTLED_STATUS: i32 = 429;

const CAPACITY_WINDOW: Duration = Duration::from_secs(1);

/// A store that keeps nothing but counters.
///
/// Every collection gets a budget of `throughput` cost units per one-second
/// window; writes that would exceed the budget come back throttled.
pub struct SimulatedStore {
    request_charge: f64,
    latency: Duration,
    state: Mutex<SimulatedState>,
}

#[derive(Default)]
struct SimulatedState {
    databases: HashSet<String>,
    collections: HashMap<(String, String), SimulatedCollection>,
}

struct SimulatedCollection {
    handle: CollectionHandle,
    window_start: Instant,
    window_charge: f64,
    documents: u64,
}

impl SimulatedStore {
    pub fn new(request_charge: f64) -> Self {
        Self {
            request_charge,
            latency: Duration::ZERO,
            state: Mutex::new(SimulatedState::default()),
        }
    }

    /// Delay every write by `latency` before it is applied.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of writes a collection has accepted.
    pub async fn document_count(&self, database: &str, collection: &str) -> u64 {
        let state = self.state.lock().await;
        state
            .collections
            .get(&(database.to_string(), collection.to_string()))
            .map(|c| c.documents)
            .unwrap_or(0)
    }
}

impl Default for SimulatedStore {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_CHARGE)
    }
}

#[async_trait]
impl StoreGateway for SimulatedStore {
    fn endpoint(&self) -> String {
        "simulated://in-process".to_string()
    }

    async fn ensure_database(&self, name: &str) -> Result<DatabaseHandle, StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidArgument(
                "database name must not be empty".to_string(),
            ));
        }
        let mut state = self.state.lock().await;
        if state.databases.insert(name.to_string()) {
            debug!("Created simulated database '{}'", name);
        }
        Ok(DatabaseHandle::new(name))
    }

    async fn ensure_collection(
        &self,
        database: &DatabaseHandle,
        name: &str,
        partition_keys: &[String],
        throughput: u32,
    ) -> Result<CollectionHandle, StoreError> {
        validate_partition_keys(partition_keys)?;
        if throughput == 0 {
            return Err(StoreError::InvalidArgument(
                "throughput must be positive".to_string(),
            ));
        }

        let mut state = self.state.lock().await;
        if !state.databases.contains(&database.id) {
            return Err(StoreError::provisioning(
                format!("collection '{name}'"),
                format!("database '{}' does not exist", database.id),
            ));
        }

        let key = (database.id.clone(), name.to_string());
        let collection = state.collections.entry(key).or_insert_with(|| {
            debug!(
                "Created simulated collection '{}' with {} units/s",
                name, throughput
            );
            SimulatedCollection {
                handle: CollectionHandle {
                    database: database.id.clone(),
                    id: name.to_string(),
                    partition_keys: partition_keys.to_vec(),
                    throughput,
                },
                window_start: Instant::now(),
                window_charge: 0.0,
                documents: 0,
            }
        });

        Ok(collection.handle.clone())
    }

    async fn create_record(
        &self,
        collection: &CollectionHandle,
        _record: &DeviceRecording,
    ) -> WriteOutcome {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.state.lock().await;
        let key = (collection.database.clone(), collection.id.clone());
        let Some(target) = state.collections.get_mut(&key) else {
            return WriteOutcome::failed(
                Some(404),
                format!("collection '{}' does not exist", collection.self_link()),
            );
        };

        let now = Instant::now();
        if now.duration_since(target.window_start) >= CAPACITY_WINDOW {
            target.window_start = now;
            target.window_charge = 0.0;
        }

        if target.window_charge + self.request_charge > f64::from(target.handle.throughput) {
            return WriteOutcome::throttled(
                Some(THROTTLED_STATUS),
                "Request rate is large",
            );
        }

        target.window_charge += self.request_charge;
        target.documents += 1;
        WriteOutcome::success(self.request_charge)
    }
}
