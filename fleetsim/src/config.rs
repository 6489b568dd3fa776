//! Fleet simulation configuration.
//!
//! All constants are fixed at startup and not runtime-mutable: the sampling
//! region, the driver roster, producer and sweeper cadence, and the bounds
//! on generated readings. Defaults match a fleet of eight vehicles
//! operating around central Dhaka.

use std::time::Duration;

use crate::coord::{BoundingRegion, GeoPoint};

/// Default center of the sampling region (central Dhaka).
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    latitude: 23.7254,
    longitude: 90.4189,
};

/// Default half-width of the sampling region, in degrees.
pub const DEFAULT_COORDINATE_RANGE_DEG: f64 = 0.1;

/// Default interval between generated readings (in seconds).
pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 5;

/// Default maximum generated speed (kph).
pub const DEFAULT_MAX_SPEED_KPH: u32 = 60;

/// Default bound on per-driver history length.
pub const DEFAULT_TRIP_HISTORY_LIMIT: usize = 100;

/// Default trip retention window (in seconds).
///
/// The sweeper also fires at this interval, so a trip may survive up to one
/// extra window past its nominal expiry.
pub const DEFAULT_DATA_RETENTION_SECS: u64 = 600;

/// Number of drivers in the default roster.
pub const DEFAULT_DRIVER_COUNT: usize = 8;

/// Fleet simulation configuration.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    /// Region coordinates are sampled from.
    pub region: BoundingRegion,

    /// Fixed driver roster. Membership never changes at runtime, and the
    /// order here is the tie-break order for proximity results.
    pub drivers: Vec<String>,

    /// Interval between producer ticks.
    pub update_interval: Duration,

    /// Maximum generated speed in kph.
    pub max_speed_kph: u32,

    /// Maximum readings retained per driver.
    pub history_limit: usize,

    /// Trip retention window; also the sweep interval.
    pub retention: Duration,

    /// RNG seed for reproducible generation. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            region: BoundingRegion::new(DEFAULT_CENTER, DEFAULT_COORDINATE_RANGE_DEG),
            drivers: default_roster(DEFAULT_DRIVER_COUNT),
            update_interval: Duration::from_secs(DEFAULT_UPDATE_INTERVAL_SECS),
            max_speed_kph: DEFAULT_MAX_SPEED_KPH,
            history_limit: DEFAULT_TRIP_HISTORY_LIMIT,
            retention: Duration::from_secs(DEFAULT_DATA_RETENTION_SECS),
            seed: None,
        }
    }
}

impl FleetConfig {
    /// Set the sampling region.
    pub fn with_region(mut self, region: BoundingRegion) -> Self {
        self.region = region;
        self
    }

    /// Set the driver roster.
    pub fn with_drivers(mut self, drivers: Vec<String>) -> Self {
        self.drivers = drivers;
        self
    }

    /// Set the producer tick interval.
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Set the per-driver history bound.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set the trip retention window (and sweep interval).
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Set the RNG seed for reproducible generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Build the default roster: `D_ID_1` through `D_ID_{count}`.
pub fn default_roster(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("D_ID_{}", i)).collect()
}
