//! Telemetry reading value type.
//!
//! A [`TelemetryReading`] is one timestamped vehicle-state snapshot:
//! position, speed and fuel level, tagged with the driver it belongs to.
//! Readings are generated fresh each producer tick and never mutated after
//! creation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::coord::GeoPoint;

/// One timestamped vehicle-state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryReading {
    /// When this reading was generated (UTC).
    pub timestamp: DateTime<Utc>,

    /// Vehicle position, rounded to 6 decimal places.
    pub coordinates: GeoPoint,

    /// Speed in kilometers per hour, in `[0, max_speed]`.
    pub speed: u32,

    /// Fuel level as a percentage, in `[0, 100]` with one decimal place.
    pub fuel_level: f64,

    /// Identifier of the driver this reading belongs to.
    ///
    /// Always a member of the fixed roster configured at startup.
    pub driver_id: String,
}

impl TelemetryReading {
    /// Create a reading with explicit fields (primarily for tests).
    pub fn new(
        timestamp: DateTime<Utc>,
        coordinates: GeoPoint,
        speed: u32,
        fuel_level: f64,
        driver_id: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            coordinates,
            speed,
            fuel_level,
            driver_id: driver_id.into(),
        }
    }
}
