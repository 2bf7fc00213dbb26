//! docdb-bench
//!
//! Insert benchmark for provisioned-throughput document stores (Azure Cosmos
//! DB's API for MongoDB, or any MongoDB server).
//!
//! # Crates
//!
//! - `bench_generator` - synthetic `DeviceRecording` documents
//! - `bench_store` - the `StoreGateway` trait and an in-process simulated store
//! - `bench_store_mongodb` - the MongoDB wire-protocol gateway
//! - `bench_core` - worker partitioning, shared counters, progress reporting
//!
//! # CLI Usage
//!
//! ```bash
//! # Run every configured collection against the store
//! docdb-bench run --config bench.yaml
//!
//! # Same run against the simulated store
//! docdb-bench run --config bench.yaml --simulate --simulated-cost 5.0 --simulated-latency-ms 4
//!
//! # Print the worker plan without connecting
//! docdb-bench validate --config bench.yaml
//! ```

pub mod config;

use anyhow::Context;
use bench_core::{partition::describe_plan, RunPlan};
use bench_store::{SimulatedStore, StoreGateway};
use bench_store_mongodb::{MongoStore, MongoStoreOptions};
use std::sync::Arc;
use std::time::Duration;

pub use config::{BenchConfig, ConfigError, ConfigOverrides, ConnectionConfig, StoreConfig};

/// In-process store settings for `run --simulate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulation {
    /// Cost charged per document.
    pub request_charge: f64,
    /// Delay applied to every write.
    pub latency: Duration,
}

/// Build the gateway a run writes through.
///
/// With a [`Simulation`], writes go to an in-process [`SimulatedStore`];
/// otherwise a MongoDB client is configured from `store`.
pub async fn connect_gateway(
    store: &StoreConfig,
    simulation: Option<Simulation>,
) -> anyhow::Result<Arc<dyn StoreGateway>> {
    if let Some(simulation) = simulation {
        let cost = simulation.request_charge;
        anyhow::ensure!(
            cost.is_finite() && cost >= 0.0,
            "simulated cost must be a non-negative number, got {cost}"
        );
        return Ok(Arc::new(
            SimulatedStore::new(cost).with_latency(simulation.latency),
        ));
    }

    anyhow::ensure!(
        !store.endpoint.trim().is_empty(),
        "no store endpoint configured (set store.endpoint, --endpoint or DOCDB_BENCH_ENDPOINT)"
    );

    let options = MongoStoreOptions {
        connection_string: store.endpoint.clone(),
        primary_key: store.primary_key.clone(),
        app_name: store.connection.app_name.clone(),
        max_pool_size: store.connection.max_pool_size,
        connect_timeout: store
            .connection
            .connect_timeout_secs
            .map(Duration::from_secs),
        flavor: None,
        request_statistics: store.connection.request_statistics,
    };
    let gateway = MongoStore::connect(options)
        .await
        .context("Failed to configure MongoDB client")?;
    Ok(Arc::new(gateway))
}

/// Human-readable worker plan for every configured collection.
pub fn describe_run_plans(config: &BenchConfig) -> String {
    let total = config.benchmark.number_of_documents_to_insert;
    let mut output = format!(
        "Database: {}\nDegree of parallelism: {}\nDocuments per collection: {}\n",
        config.store.database, config.benchmark.degree_of_parallelism, total
    );
    for collection in &config.collections {
        let plan = RunPlan::new(
            config.benchmark.degree_of_parallelism,
            total,
            collection.throughput,
        );
        output.push_str(&format!(
            "  {} ({} RU/s, partition key {}): {}\n",
            collection.id,
            collection.throughput,
            collection.partition_keys.join(", "),
            describe_plan(&plan, total)
        ));
    }
    output
}
