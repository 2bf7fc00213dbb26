//! Test doubles shared by the unit tests in this crate.

use async_trait::async_trait;
use bench_generator::DeviceRecording;
use bench_store::{CollectionHandle, DatabaseHandle, StoreError, StoreGateway, WriteOutcome};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Gateway that answers every write with the same outcome.
pub struct StubGateway {
    outcome: WriteOutcome,
    fail_setup: bool,
    writes: AtomicU64,
}

impl StubGateway {
    pub fn new(outcome: WriteOutcome) -> Self {
        Self {
            outcome,
            fail_setup: false,
            writes: AtomicU64::new(0),
        }
    }

    pub fn failing_setup() -> Self {
        Self {
            fail_setup: true,
            ..Self::new(WriteOutcome::success(1.0))
        }
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreGateway for StubGateway {
    fn endpoint(&self) -> String {
        "stub://test".to_string()
    }

    async fn ensure_database(&self, name: &str) -> Result<DatabaseHandle, StoreError> {
        if self.fail_setup {
            return Err(StoreError::Connection("connection refused".to_string()));
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
        Ok(CollectionHandle {
            database: database.id.clone(),
            id: name.to_string(),
            partition_keys: partition_keys.to_vec(),
            throughput,
        })
    }

    async fn create_record(
        &self,
        _collection: &CollectionHandle,
        _record: &DeviceRecording,
    ) -> WriteOutcome {
        self.writes.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.outcome.clone()
    }
}

pub fn test_collection() -> CollectionHandle {
    CollectionHandle {
        database: "db".to_string(),
        id: "data".to_string(),
        partition_keys: vec!["/deviceId".to_string()],
        throughput: 400,
    }
}

/// `Write` sink whose contents can be inspected after it has been moved.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
