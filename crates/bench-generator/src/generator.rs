//! Main generator producing device recordings.

use crate::generators::{generate_float_range, generate_uuid_v4};
use crate::recording::{
    device_location_composite, DeviceRecording, SubmitBuckets, RECORDING_VERSION,
};
use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use uuid::Uuid;

/// Number of distinct devices a run writes readings for.
pub const DEVICE_POOL_SIZE: usize = 200;

/// Number of distinct locations a run writes readings for.
pub const LOCATION_POOL_SIZE: usize = 10;

const TEMPERATURE_RANGE: (f64, f64) = (20.0, 25.0);
const HUMIDITY_RANGE: (f64, f64) = (0.1, 0.25);

/// Device and location ids shared by every generator of a benchmark run.
#[derive(Debug, Clone)]
pub struct IdPools {
    devices: Vec<Uuid>,
    locations: Vec<Uuid>,
}

impl IdPools {
    /// Build the default pools (200 devices, 10 locations) from a seed.
    pub fn new(seed: u64) -> Self {
        Self::with_sizes(seed, DEVICE_POOL_SIZE, LOCATION_POOL_SIZE)
    }

    /// Build pools of the given sizes. Sizes of zero are raised to one.
    pub fn with_sizes(seed: u64, devices: usize, locations: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let devices = (0..devices.max(1))
            .map(|_| generate_uuid_v4(&mut rng))
            .collect();
        let locations = (0..locations.max(1))
            .map(|_| generate_uuid_v4(&mut rng))
            .collect();
        Self { devices, locations }
    }

    pub fn devices(&self) -> &[Uuid] {
        &self.devices
    }

    pub fn locations(&self) -> &[Uuid] {
        &self.locations
    }
}

/// Generator that produces one [`DeviceRecording`] per call.
///
/// The RNG is seeded so a worker replays the same sequence of devices,
/// locations, and readings across runs; submit-time buckets come from the
/// wall clock unless [`RecordingGenerator::generate_at`] is used.
pub struct RecordingGenerator {
    pools: Arc<IdPools>,
    rng: StdRng,
}

impl RecordingGenerator {
    pub fn new(pools: Arc<IdPools>, seed: u64) -> Self {
        Self {
            pools,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a recording stamped with the current local time.
    pub fn generate(&mut self) -> DeviceRecording {
        self.generate_at(Local::now().naive_local())
    }

    /// Generate a recording stamped with `submit_time`.
    pub fn generate_at(&mut self, submit_time: NaiveDateTime) -> DeviceRecording {
        let device_id = self.pick(Pool::Devices);
        let location_id = self.pick(Pool::Locations);
        let buckets = SubmitBuckets::from_timestamp(submit_time);

        let temperature_celsius =
            generate_float_range(&mut self.rng, TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1);
        let humidity = generate_float_range(&mut self.rng, HUMIDITY_RANGE.0, HUMIDITY_RANGE.1);

        DeviceRecording {
            version: RECORDING_VERSION,
            device_id,
            location_id,
            device_location_composite: device_location_composite(&device_id, &location_id),
            submit_day: buckets.day,
            submit_hour: buckets.hour,
            submit_minute: buckets.minute,
            submit_second: buckets.second,
            temperature_celsius,
            humidity,
        }
    }

    fn pick(&mut self, pool: Pool) -> Uuid {
        let ids = match pool {
            Pool::Devices => self.pools.devices(),
            Pool::Locations => self.pools.locations(),
        };
        ids[self.rng.gen_range(0..ids.len())]
    }
}

#[derive(Clone, Copy)]
enum Pool {
    Devices,
    Locations,
}
