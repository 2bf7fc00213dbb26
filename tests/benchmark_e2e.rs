//! End-to-end benchmark runs against the simulated store.

use bench_core::{Benchmark, BenchmarkSettings, CollectionSettings, Parallelism};
use bench_store::{SimulatedStore, StoreGateway};
use docdb_bench::{connect_gateway, BenchConfig, Simulation};
use std::sync::Arc;
use std::time::Duration;

fn settings(documents: u64, parallelism: Parallelism) -> BenchmarkSettings {
    BenchmarkSettings::new("IoTDatabase")
        .with_documents(documents)
        .with_parallelism(parallelism)
        .with_progress_interval(Duration::from_millis(20))
}

#[tokio::test]
async fn test_hundred_documents_ten_workers() {
    let store = Arc::new(SimulatedStore::new(5.0));
    let benchmark = Benchmark::new(store.clone(), settings(100, Parallelism::Fixed(10)));

    let summary = benchmark
        .run_collection(&CollectionSettings::new("RawData", "/deviceId", 10_000))
        .await
        .unwrap();

    assert_eq!(summary.worker_count, 10);
    assert_eq!(summary.records_assigned, 100);
    assert_eq!(summary.total_inserted(), 100);
    assert_eq!(summary.total_cost(), 500.0);
    assert_eq!(summary.throttled_writes, 0);
    assert_eq!(summary.failed_writes, 0);
    assert_eq!(store.document_count("IoTDatabase", "RawData").await, 100);
}

#[tokio::test(start_paused = true)]
async fn test_throttled_writes_are_counted_without_cost() {
    // 50 units/s at 5 per write: ten writes fit before the store throttles,
    // and the paused clock keeps every write inside the first window.
    let store = Arc::new(SimulatedStore::new(5.0));
    let benchmark = Benchmark::new(store.clone(), settings(100, Parallelism::Fixed(4)));

    let summary = benchmark
        .run_collection(&CollectionSettings::new("Throttled", "/deviceId", 50))
        .await
        .unwrap();

    assert_eq!(summary.total_inserted(), 100);
    assert_eq!(summary.total_cost(), 50.0);
    assert_eq!(summary.throttled_writes, 90);
    assert_eq!(store.document_count("IoTDatabase", "Throttled").await, 10);
}

#[tokio::test]
async fn test_run_all_collections_in_order() {
    let store = Arc::new(SimulatedStore::new(1.0));
    let benchmark = Benchmark::new(store.clone(), settings(40, Parallelism::Auto));
    let collections = vec![
        CollectionSettings::new("First", "/deviceId", 400),
        CollectionSettings::new("Second", "/locationId", 100),
    ];

    let summaries = benchmark.run_all(&collections).await.unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].collection, "First");
    assert_eq!(summaries[0].worker_count, 4);
    assert_eq!(summaries[1].collection, "Second");
    assert_eq!(summaries[1].worker_count, 1);
    assert_eq!(store.document_count("IoTDatabase", "First").await, 40);
    assert_eq!(store.document_count("IoTDatabase", "Second").await, 40);
}

#[tokio::test]
async fn test_invalid_collection_fails_before_writes() {
    let store = Arc::new(SimulatedStore::new(1.0));
    let benchmark = Benchmark::new(store.clone(), settings(10, Parallelism::Fixed(2)));

    let result = benchmark
        .run_collection(&CollectionSettings::new("Bad", "deviceId", 400))
        .await;

    assert!(result.is_err());
    assert_eq!(store.document_count("IoTDatabase", "Bad").await, 0);
}

#[tokio::test]
async fn test_config_driven_simulated_run() {
    let config = BenchConfig::from_yaml(
        r#"
store:
  database: IoTDatabase
benchmark:
  degree_of_parallelism: 5
  number_of_documents_to_insert: 52
  progress_interval_ms: 10
collections:
  - id: RawData
    partition_keys: ["/deviceId"]
    throughput: 1000
"#,
    )
    .unwrap();
    config.validate().unwrap();

    let simulation = Simulation {
        request_charge: 2.0,
        latency: Duration::from_millis(1),
    };
    let gateway: Arc<dyn StoreGateway> = connect_gateway(&config.store, Some(simulation))
        .await
        .unwrap();
    let benchmark = Benchmark::new(gateway, config.benchmark_settings());
    let summaries = benchmark.run_all(&config.collections).await.unwrap();

    // 52 / 5 workers leaves two documents unwritten.
    assert_eq!(summaries[0].records_assigned, 50);
    assert_eq!(summaries[0].total_inserted(), 50);
    assert_eq!(summaries[0].total_cost(), 100.0);
}
