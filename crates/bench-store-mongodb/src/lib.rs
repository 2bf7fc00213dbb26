//! MongoDB store gateway for docdb-bench.
//!
//! Works against a plain MongoDB deployment and against Azure Cosmos DB's API
//! for MongoDB. In Cosmos mode collections are provisioned with the
//! `CreateCollection` custom action (shard key plus `offerThroughput`).
//!
//! The charge credited to an insert is estimated from the encoded document
//! size. With `request_statistics` enabled against Cosmos DB it is read back
//! with `getLastRequestStatistics` instead; that statistic is per connection,
//! so the pool is pinned to one connection and writes are serialized.

pub mod error;
pub mod store;
pub mod write;

pub use error::MongoStoreError;
pub use store::{ChargeSource, MongoStore, MongoStoreOptions, StoreFlavor};
pub use write::{classify_server_error, THROTTLE_CODES};
