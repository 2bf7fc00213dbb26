//! Error types for the MongoDB gateway.

use bench_store::StoreError;
use thiserror::Error;

/// Errors that can occur while setting up the MongoDB gateway.
#[derive(Error, Debug)]
pub enum MongoStoreError {
    /// MongoDB connection or command error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// A record could not be encoded as BSON.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<MongoStoreError> for StoreError {
    fn from(err: MongoStoreError) -> Self {
        match err {
            MongoStoreError::Config(message) => StoreError::InvalidArgument(message),
            other => StoreError::Connection(other.to_string()),
        }
    }
}
