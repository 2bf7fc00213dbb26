//! Synthetic record generator for the docdb-bench insert benchmark.
//!
//! Every insert worker owns a [`RecordingGenerator`]. Generators for one run
//! share the same [`IdPools`] so that device and location ids repeat across
//! workers the way a real fleet of sensors would, while each generator keeps
//! its own seeded RNG.
//!
//! ```text
//!   IdPools (200 devices, 10 locations)
//!          │  Arc
//!    ┌─────┴──────┬──────────────┐
//!    ▼            ▼              ▼
//! generator 0  generator 1 ... generator N-1   (seed + worker id)
//!    │
//!    ▼
//! DeviceRecording { deviceId, locationId, submitDay, ..., humidity }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bench_generator::{IdPools, RecordingGenerator};
//! use std::sync::Arc;
//!
//! let pools = Arc::new(IdPools::new(42));
//! let mut generator = RecordingGenerator::new(pools, 42);
//! let recording = generator.generate();
//! assert_eq!(recording.version, 1.0);
//! ```

pub mod generator;
pub mod generators;
pub mod recording;

pub use generator::{IdPools, RecordingGenerator};
pub use recording::DeviceRecording;
