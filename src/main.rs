//! Command-line interface for docdb-bench
//!
//! # Usage Examples
//!
//! ```bash
//! # Benchmark every collection in the config file
//! docdb-bench run --config bench.yaml
//!
//! # Override the endpoint and credentials from the environment
//! DOCDB_BENCH_ENDPOINT="mongodb://acct@acct.mongo.cosmos.azure.com:10255/?ssl=true" \
//! DOCDB_BENCH_PRIMARY_KEY="..." \
//!   docdb-bench run --config bench.yaml --documents 10000 --parallelism 16
//!
//! # Dry run against the in-process simulated store, 2ms per write
//! docdb-bench run --config bench.yaml --simulate --simulated-latency-ms 2
//!
//! # Show the worker plan without connecting
//! docdb-bench validate --config bench.yaml
//! ```

use anyhow::Context;
use bench_core::Benchmark;
use bench_store::DEFAULT_REQUEST_CHARGE;
use clap::{Args, Parser, Subcommand};
use docdb_bench::{connect_gateway, describe_run_plans, BenchConfig, ConfigOverrides, Simulation};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "docdb-bench")]
#[command(about = "Insert throughput benchmark for provisioned-throughput document stores")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert generated documents into every configured collection
    Run {
        #[command(flatten)]
        overrides: OverrideArgs,

        /// Write to an in-process simulated store instead of a real one
        #[arg(long)]
        simulate: bool,

        /// Cost charged per document by the simulated store
        #[arg(long, default_value_t = DEFAULT_REQUEST_CHARGE)]
        simulated_cost: f64,

        /// Delay applied to every simulated write, in milliseconds
        #[arg(long, default_value_t = 0)]
        simulated_latency_ms: u64,
    },

    /// Load and validate the configuration, then print the worker plan
    Validate {
        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

#[derive(Args)]
struct OverrideArgs {
    /// Benchmark configuration file (.yaml, .yml, .json or .toml)
    #[arg(long, value_name = "PATH")]
    config: PathBuf,

    /// Store connection string
    #[arg(long, env = "DOCDB_BENCH_ENDPOINT")]
    endpoint: Option<String>,

    /// Account key used as the connection password
    #[arg(long, env = "DOCDB_BENCH_PRIMARY_KEY", hide_env_values = true)]
    primary_key: Option<String>,

    /// Database name
    #[arg(long)]
    database: Option<String>,

    /// Documents to insert per collection
    #[arg(long)]
    documents: Option<u64>,

    /// Insert workers per collection (-1 derives it from throughput)
    #[arg(long, allow_hyphen_values = true)]
    parallelism: Option<i64>,
}

impl OverrideArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            primary_key: self.primary_key.clone(),
            database: self.database.clone(),
            documents: self.documents,
            parallelism: self.parallelism,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            overrides,
            simulate,
            simulated_cost,
            simulated_latency_ms,
        } => {
            let config = load_config(&overrides.config, &overrides.overrides())?;
            let simulation = simulate.then_some(Simulation {
                request_charge: simulated_cost,
                latency: Duration::from_millis(simulated_latency_ms),
            });
            run_benchmark(config, simulation).await
        }
        Commands::Validate { overrides } => {
            let config = load_config(&overrides.config, &overrides.overrides())?;
            print!("{}", describe_run_plans(&config));
            println!("Configuration is valid");
            Ok(())
        }
    }
}

fn load_config(path: &Path, overrides: &ConfigOverrides) -> anyhow::Result<BenchConfig> {
    let mut config = BenchConfig::from_file(path)
        .with_context(|| format!("Failed to load benchmark config from {path:?}"))?;
    config
        .apply_overrides(overrides)
        .context("Invalid command-line override")?;
    config
        .validate()
        .with_context(|| format!("Invalid benchmark config {path:?}"))?;
    Ok(config)
}

async fn run_benchmark(config: BenchConfig, simulation: Option<Simulation>) -> anyhow::Result<()> {
    println!("DocDB benchmark starting...");

    let gateway = connect_gateway(&config.store, simulation).await?;
    info!("Writing through {}", gateway.endpoint());

    let benchmark = Benchmark::new(gateway, config.benchmark_settings());
    let summaries = benchmark
        .run_all(&config.collections)
        .await
        .context("Benchmark failed")?;

    for summary in &summaries {
        info!(
            "{}: {} inserted by {} workers ({} throttled, {} failed)",
            summary.collection,
            summary.total_inserted(),
            summary.worker_count,
            summary.throttled_writes,
            summary.failed_writes
        );
    }

    println!("DocDB benchmark completed successfully.");
    Ok(())
}
