//! Store gateway boundary for docdb-bench.
//!
//! The benchmark core only talks to a document store through the
//! [`StoreGateway`] trait. Setup calls (`ensure_database`,
//! `ensure_collection`) return `Result` because a provisioning failure aborts
//! the run, while `create_record` always returns a [`WriteOutcome`] that the
//! insert worker classifies on its own.
//!
//! Implementations:
//! - [`SimulatedStore`]: in-process store charging a fixed cost per write and
//!   throttling once a collection's provisioned throughput is used up for the
//!   current second.
//! - `bench-store-mongodb`: MongoDB wire protocol (including Cosmos DB's API
//!   for MongoDB).

pub mod error;
pub mod gateway;
pub mod logging;
pub mod outcome;
pub mod simulated;

pub use error::StoreError;
pub use gateway::{validate_partition_keys, CollectionHandle, DatabaseHandle, StoreGateway};
pub use logging::mask_connection_password;
pub use outcome::WriteOutcome;
pub use simulated::{SimulatedStore, DEFAULT_REQUEST_CHARGE};
