//! Benchmark configuration files.
//!
//! The format is chosen from the file extension: `.yaml`/`.yml`, `.json` or
//! `.toml`. Command-line overrides are applied on top with
//! [`BenchConfig::apply_overrides`] before [`BenchConfig::validate`] runs.

use bench_core::{BenchmarkSettings, CollectionSettings, Parallelism};
use bench_store::validate_partition_keys;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unsupported config file extension '{0}' (expected yaml, yml, json or toml)")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub store: StoreConfig,
    pub benchmark: BenchmarkConfig,
    pub collections: Vec<CollectionSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connection string; may be left out of the file and given on the command line.
    #[serde(default)]
    pub endpoint: String,
    /// Account key, sent as the password of the connection string's user.
    #[serde(default)]
    pub primary_key: Option<String>,
    pub database: String,
    #[serde(default)]
    pub connection: ConnectionConfig,
}

/// Client tuning for the store driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub app_name: Option<String>,
    pub max_pool_size: Option<u32>,
    pub connect_timeout_secs: Option<u64>,
    /// Read each insert's charge back from Cosmos DB instead of estimating
    /// it. Writes are serialized on one connection while this is on.
    pub request_statistics: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            app_name: Some("docdb-bench".to_string()),
            max_pool_size: None,
            connect_timeout_secs: None,
            request_statistics: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default = "default_parallelism")]
    pub degree_of_parallelism: Parallelism,
    pub number_of_documents_to_insert: u64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
}

fn default_parallelism() -> Parallelism {
    Parallelism::Auto
}

fn default_seed() -> u64 {
    42
}

fn default_progress_interval_ms() -> u64 {
    1000
}

/// Values given on the command line that replace what the file says.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub primary_key: Option<String>,
    pub database: Option<String>,
    pub documents: Option<u64>,
    pub parallelism: Option<i64>,
}

impl BenchConfig {
    /// Load a config file, picking the parser from its extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let content = fs::read_to_string(path)?;
        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&content),
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(endpoint) = &overrides.endpoint {
            self.store.endpoint = endpoint.clone();
        }
        if let Some(primary_key) = &overrides.primary_key {
            self.store.primary_key = Some(primary_key.clone());
        }
        if let Some(database) = &overrides.database {
            self.store.database = database.clone();
        }
        if let Some(documents) = overrides.documents {
            self.benchmark.number_of_documents_to_insert = documents;
        }
        if let Some(parallelism) = overrides.parallelism {
            self.benchmark.degree_of_parallelism =
                Parallelism::try_from(parallelism).map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }

    /// Check the settings a benchmark run depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.database.trim().is_empty() {
            return Err(ConfigError::Invalid("database name is empty".to_string()));
        }
        if self.collections.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one collection must be configured".to_string(),
            ));
        }
        for collection in &self.collections {
            if collection.id.trim().is_empty() {
                return Err(ConfigError::Invalid("collection id is empty".to_string()));
            }
            if collection.throughput == 0 {
                return Err(ConfigError::Invalid(format!(
                    "collection '{}' must have positive throughput",
                    collection.id
                )));
            }
            validate_partition_keys(&collection.partition_keys).map_err(|e| {
                ConfigError::Invalid(format!("collection '{}': {e}", collection.id))
            })?;
        }
        Ok(())
    }

    pub fn benchmark_settings(&self) -> BenchmarkSettings {
        BenchmarkSettings::new(self.store.database.clone())
            .with_parallelism(self.benchmark.degree_of_parallelism)
            .with_documents(self.benchmark.number_of_documents_to_insert)
            .with_seed(self.benchmark.seed)
            .with_progress_interval(Duration::from_millis(self.benchmark.progress_interval_ms))
    }
}
