//! The document written by every benchmark insert.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Schema version stamped on every generated recording.
pub const RECORDING_VERSION: f64 = 1.0;

/// A single sensor reading submitted by a device at a location.
///
/// Field names serialize in camelCase so partition key paths such as
/// `/deviceId` resolve against the stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecording {
    pub version: f64,
    pub device_id: Uuid,
    pub location_id: Uuid,
    /// `{device_id}_{location_id}`
    pub device_location_composite: String,
    /// `yyyy-MM-dd`
    pub submit_day: String,
    /// `yyyy-MM-dd-HH`
    pub submit_hour: String,
    /// `yyyy-MM-dd-HH-mm`
    pub submit_minute: String,
    /// `yyyy-MM-dd-HH-mm-ss`
    pub submit_second: String,
    pub temperature_celsius: f64,
    pub humidity: f64,
}

/// Submit-time buckets derived from a single timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitBuckets {
    pub day: String,
    pub hour: String,
    pub minute: String,
    pub second: String,
}

impl SubmitBuckets {
    pub fn from_timestamp(submit_time: NaiveDateTime) -> Self {
        Self {
            day: submit_time.format("%Y-%m-%d").to_string(),
            hour: submit_time.format("%Y-%m-%d-%H").to_string(),
            minute: submit_time.format("%Y-%m-%d-%H-%M").to_string(),
            second: submit_time.format("%Y-%m-%d-%H-%M-%S").to_string(),
        }
    }
}

/// Build the composite key used to co-locate a device's readings per location.
pub fn device_location_composite(device_id: &Uuid, location_id: &Uuid) -> String {
    format!("{device_id}_{location_id}")
}
