//! Geographic coordinate type definitions

use serde::Serialize;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A geographic point in decimal degrees.
///
/// Serializes as `{"latitude": ..., "longitude": ...}`, which is the shape
/// used throughout the query responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point from decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns this point with both axes rounded to 6 decimal places.
    ///
    /// Six decimals is roughly 11cm of precision at the equator, which is
    /// the resolution telemetry readings are published at.
    #[inline]
    pub fn rounded(&self) -> Self {
        Self {
            latitude: round6(self.latitude),
            longitude: round6(self.longitude),
        }
    }
}

/// A square sampling region around a center point.
///
/// Spans `[center - range_deg, center + range_deg]` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    /// Center of the region
    pub center: GeoPoint,
    /// Half-width of the region on each axis, in degrees
    pub range_deg: f64,
}

impl BoundingRegion {
    /// Create a region centered on the given point.
    pub fn new(center: GeoPoint, range_deg: f64) -> Self {
        Self { center, range_deg }
    }

    /// Check whether a point lies inside the region (inclusive).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (point.latitude - self.center.latitude).abs() <= self.range_deg
            && (point.longitude - self.center.longitude).abs() <= self.range_deg
    }
}

/// Round a value to 6 decimal places.
#[inline]
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
