//! Error types for store setup operations.

use thiserror::Error;

/// Errors raised while connecting to or provisioning the store.
///
/// Individual writes never produce a `StoreError`; they report a
/// [`crate::WriteOutcome`] instead.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection or handshake error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Database or collection could not be created or validated.
    #[error("Failed to provision {resource}: {message}")]
    Provisioning { resource: String, message: String },

    /// A setup argument was rejected before reaching the store.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl StoreError {
    pub fn provisioning(resource: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Provisioning {
            resource: resource.into(),
            message: message.into(),
        }
    }
}
