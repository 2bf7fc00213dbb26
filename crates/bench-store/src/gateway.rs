//! The store gateway trait and the handles it hands out.

use crate::error::StoreError;
use crate::outcome::WriteOutcome;
use async_trait::async_trait;
use bench_generator::DeviceRecording;

/// A validated database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHandle {
    pub id: String,
}

impl DatabaseHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Resource path in the `dbs/{id}` form.
    pub fn self_link(&self) -> String {
        format!("dbs/{}", self.id)
    }
}

/// A validated collection inside a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    pub database: String,
    pub id: String,
    /// Partition key paths, e.g. `/deviceId`.
    pub partition_keys: Vec<String>,
    /// Provisioned throughput in cost units per second.
    pub throughput: u32,
}

impl CollectionHandle {
    /// Resource path in the `dbs/{db}/colls/{id}` form.
    pub fn self_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.id)
    }

    /// First partition key path without its leading slash.
    pub fn partition_key_property(&self) -> Option<&str> {
        self.partition_keys
            .first()
            .map(|path| path.trim_start_matches('/'))
    }
}

/// Operations the benchmark needs from a document store.
///
/// Implementations own connection pooling and any protocol details.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Endpoint description for banners and logs, with credentials masked.
    fn endpoint(&self) -> String;

    /// Create the database if it does not exist and return a handle to it.
    async fn ensure_database(&self, name: &str) -> Result<DatabaseHandle, StoreError>;

    /// Create the collection if it does not exist and return a handle to it.
    async fn ensure_collection(
        &self,
        database: &DatabaseHandle,
        name: &str,
        partition_keys: &[String],
        throughput: u32,
    ) -> Result<CollectionHandle, StoreError>;

    /// Write one record.
    async fn create_record(
        &self,
        collection: &CollectionHandle,
        record: &DeviceRecording,
    ) -> WriteOutcome;
}

/// Check partition key paths before sending them to a store.
pub fn validate_partition_keys(partition_keys: &[String]) -> Result<(), StoreError> {
    if partition_keys.is_empty() {
        return Err(StoreError::InvalidArgument(
            "at least one partition key path is required".to_string(),
        ));
    }
    if let Some(bad) = partition_keys
        .iter()
        .find(|path| !path.starts_with('/') || path.len() < 2)
    {
        return Err(StoreError::InvalidArgument(format!(
            "partition key path '{bad}' must start with '/'"
        )));
    }
    Ok(())
}
