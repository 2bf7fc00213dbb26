//! Single-document insert helpers and write outcome classification.

use crate::error::MongoStoreError;
use bench_generator::DeviceRecording;
use bench_store::WriteOutcome;
use bson::{Bson, Document};
use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server error codes treated as capacity rejections.
///
/// 16500 is Cosmos DB's "request rate is large"; 13 is the unauthorized /
/// forbidden rejection Cosmos DB returns when a quota is exhausted.
pub const THROTTLE_CODES: [i32; 2] = [16500, 13];

/// Estimated cost of writing one kilobyte when the store does not report it.
pub const ESTIMATED_CHARGE_PER_KB: f64 = 5.0;

/// Convert a recording into a BSON document.
///
/// Goes through JSON so UUIDs are stored as their string form, which keeps
/// partition key values readable.
pub fn record_to_document(record: &DeviceRecording) -> Result<Document, MongoStoreError> {
    let json = serde_json::to_value(record).map_err(|e| MongoStoreError::Encoding(e.to_string()))?;
    let bson = Bson::try_from(json).map_err(|e| MongoStoreError::Encoding(e.to_string()))?;
    match bson {
        Bson::Document(doc) => Ok(doc),
        other => Err(MongoStoreError::Encoding(format!(
            "expected a document, got {:?}",
            other.element_type()
        ))),
    }
}

/// Estimate the cost of inserting `doc` from its encoded size.
pub fn estimate_request_charge(doc: &Document) -> f64 {
    let bytes = bson::to_vec(doc).map(|b| b.len()).unwrap_or(1024);
    let kilobytes = bytes.div_ceil(1024).max(1);
    kilobytes as f64 * ESTIMATED_CHARGE_PER_KB
}

/// Server-side error code carried by a driver error, if any.
pub fn server_error_code(err: &Error) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Command(command_error) => Some(command_error.code),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error.code),
        ErrorKind::Write(WriteFailure::WriteConcernError(concern_error)) => {
            Some(concern_error.code)
        }
        _ => None,
    }
}

/// Classify a failed write by its server error code.
pub fn classify_server_error(code: Option<i32>, message: impl Into<String>) -> WriteOutcome {
    match code {
        Some(code) if THROTTLE_CODES.contains(&code) => WriteOutcome::throttled(Some(code), message),
        _ => WriteOutcome::failed(code, message),
    }
}

/// Classify a driver error returned by an insert.
pub fn classify_error(err: &Error) -> WriteOutcome {
    classify_server_error(server_error_code(err), err.to_string())
}
