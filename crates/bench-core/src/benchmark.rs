//! Benchmark orchestration: provision, fan out workers, collect results.

use std::io::{self, Write};
use std::sync::Arc;

use bench_generator::{IdPools, RecordingGenerator};
use bench_store::{CollectionHandle, StoreGateway};
use tokio::time::Instant;
use tracing::{error, info};

use crate::config::{BenchmarkSettings, CollectionSettings};
use crate::counters::SharedCounters;
use crate::error::BenchError;
use crate::metrics::BenchmarkSummary;
use crate::partition::{describe_plan, RunPlan};
use crate::report::format_banner;
use crate::reporter::ProgressReporter;
use crate::worker::InsertWorker;

/// Drives insert benchmarks against one store.
pub struct Benchmark {
    gateway: Arc<dyn StoreGateway>,
    settings: BenchmarkSettings,
    pools: Arc<IdPools>,
}

impl Benchmark {
    pub fn new(gateway: Arc<dyn StoreGateway>, settings: BenchmarkSettings) -> Self {
        let pools = Arc::new(IdPools::new(settings.seed));
        Self {
            gateway,
            settings,
            pools,
        }
    }

    /// Benchmark each collection in turn. Stops at the first setup error.
    pub async fn run_all(
        &self,
        collections: &[CollectionSettings],
    ) -> Result<Vec<BenchmarkSummary>, BenchError> {
        let mut summaries = Vec::with_capacity(collections.len());
        for collection in collections {
            summaries.push(self.run_collection(collection).await?);
        }
        Ok(summaries)
    }

    /// Provision one collection and insert into it, printing to stdout.
    pub async fn run_collection(
        &self,
        collection: &CollectionSettings,
    ) -> Result<BenchmarkSummary, BenchError> {
        self.run_collection_with_output(collection, io::stdout())
            .await
    }

    pub async fn run_collection_with_output<W>(
        &self,
        collection: &CollectionSettings,
        mut out: W,
    ) -> Result<BenchmarkSummary, BenchError>
    where
        W: Write + Send + 'static,
    {
        let database = self
            .gateway
            .ensure_database(&self.settings.database)
            .await?;
        write_line(&mut out, &format!("Database Validated:\t{}", database.self_link()))?;

        let handle = self
            .gateway
            .ensure_collection(
                &database,
                &collection.id,
                &collection.partition_keys,
                collection.throughput,
            )
            .await?;
        write_line(&mut out, &format!("Collection Validated:\t{}", handle.self_link()))?;

        self.benchmark_collection(handle, out).await
    }

    /// Run the insert phase against an already provisioned collection.
    pub async fn benchmark_collection<W>(
        &self,
        collection: CollectionHandle,
        mut out: W,
    ) -> Result<BenchmarkSummary, BenchError>
    where
        W: Write + Send + 'static,
    {
        let total = self.settings.documents_to_insert;
        let plan = RunPlan::new(self.settings.parallelism, total, collection.throughput);

        out.write_all(
            format_banner(
                &self.gateway.endpoint(),
                &collection,
                plan.worker_count,
                total,
            )
            .as_bytes(),
        )
        .map_err(reporter_error)?;
        info!(
            "Starting inserts into {}: {}",
            collection.self_link(),
            describe_plan(&plan, total)
        );

        let counters = Arc::new(SharedCounters::new(plan.assignments.len()));
        let collection = Arc::new(collection);
        let start = Instant::now();
        let reporter =
            ProgressReporter::new(counters.clone(), self.settings.progress_interval, out)
                .spawn(start);

        let handles: Vec<_> = plan
            .assignments
            .iter()
            .map(|assignment| {
                let generator = RecordingGenerator::new(
                    self.pools.clone(),
                    self.settings
                        .seed
                        .wrapping_add(assignment.worker_id as u64),
                );
                let worker = InsertWorker::new(
                    *assignment,
                    generator,
                    self.gateway.clone(),
                    collection.clone(),
                    counters.clone(),
                );
                (assignment.worker_id, tokio::spawn(worker.run()))
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        let mut worker_failure = None;
        for (worker_id, handle) in handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!("Insert worker {worker_id} did not complete: {e}");
                    worker_failure.get_or_insert(BenchError::Worker {
                        worker_id,
                        message: e.to_string(),
                    });
                }
            }
        }

        let outcome = reporter
            .await
            .map_err(|e| BenchError::Reporter(e.to_string()))?
            .map_err(reporter_error)?;

        if let Some(failure) = worker_failure {
            return Err(failure);
        }

        let summary = BenchmarkSummary {
            collection: collection.id.clone(),
            worker_count: plan.worker_count,
            records_assigned: plan.records_assigned(),
            final_snapshot: outcome.final_snapshot,
            progress_ticks: outcome.progress_ticks,
            throttled_writes: reports.iter().map(|r| r.throttled).sum(),
            failed_writes: reports.iter().map(|r| r.failed).sum(),
        };

        info!(
            "Finished {}: {} inserted, {} throttled, {} failed in {:.2}s",
            collection.self_link(),
            summary.total_inserted(),
            summary.throttled_writes,
            summary.failed_writes,
            summary.final_snapshot.elapsed.as_secs_f64()
        );

        Ok(summary)
    }
}

fn write_line<W: Write>(out: &mut W, line: &str) -> Result<(), BenchError> {
    writeln!(out, "{line}").map_err(reporter_error)
}

fn reporter_error(e: io::Error) -> BenchError {
    BenchError::Reporter(e.to_string())
}
