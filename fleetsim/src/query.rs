//! Read-only query service.
//!
//! Composes the three query classes over the store: last-known position,
//! proximity search and bounded trip history. Every operation works on a
//! consistent per-driver snapshot; failures are terminal for the single
//! query and never touch store state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::coord::GeoPoint;
use crate::proximity::{rank_nearby, Candidate};
use crate::store::DriverStateStore;

/// Default proximity search radius, in kilometers.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 5.0;

/// Default number of history entries returned by a trip-history query.
pub const DEFAULT_HISTORY_QUERY_LIMIT: usize = 10;

/// Query failure taxonomy.
///
/// Both variants surface as 404 at the HTTP layer, with distinct bodies so
/// clients can tell "will never exist" from "not yet populated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Identifier outside the fixed driver roster.
    #[error("Driver not found")]
    DriverNotFound,

    /// Valid identifier with no reading produced yet.
    #[error("No data available")]
    NoData,
}

/// Last-known position of one driver.
#[derive(Debug, Clone, Serialize)]
pub struct LivePosition {
    /// Driver identifier.
    pub driver_id: String,
    /// Position of the latest reading.
    pub position: GeoPoint,
    /// Timestamp of the latest reading.
    pub timestamp: DateTime<Utc>,
    /// Speed of the latest reading, in kph.
    pub speed: u32,
}

/// One entry of a proximity search result.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyVehicle {
    /// Driver identifier.
    pub driver_id: String,
    /// Distance from the origin in kilometers, rounded to 2 decimals.
    pub distance: f64,
    /// The vehicle's latest position.
    pub position: GeoPoint,
    /// Timestamp of the vehicle's latest reading.
    pub timestamp: DateTime<Utc>,
}

/// Result of a proximity search.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyReport {
    /// Search radius in kilometers.
    pub radius: f64,
    /// The origin driver's latest position.
    pub center: GeoPoint,
    /// Vehicles within the radius, nearest first.
    pub nearby_vehicles: Vec<NearbyVehicle>,
}

/// One entry of a trip-history result.
#[derive(Debug, Clone, Serialize)]
pub struct TripPosition {
    /// When the reading was generated.
    pub timestamp: DateTime<Utc>,
    /// Position of the reading.
    pub coordinates: GeoPoint,
    /// Speed of the reading, in kph.
    pub speed: u32,
}

/// Result of a trip-history query.
#[derive(Debug, Clone, Serialize)]
pub struct TripHistory {
    /// Driver identifier.
    pub driver_id: String,
    /// Start of the current trip window.
    pub trip_start: DateTime<Utc>,
    /// The most recent entries, oldest-first within the slice.
    pub positions: Vec<TripPosition>,
}

/// Read-only operations over the telemetry store.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<DriverStateStore>,
}

impl QueryService {
    /// Create a query service over the given store.
    pub fn new(store: Arc<DriverStateStore>) -> Self {
        Self { store }
    }

    /// Last-known position of the driver.
    ///
    /// # Errors
    ///
    /// [`QueryError::DriverNotFound`] for identifiers outside the roster,
    /// [`QueryError::NoData`] when no reading has arrived yet.
    pub fn live_position(&self, driver_id: &str) -> Result<LivePosition, QueryError> {
        let snapshot = self
            .store
            .snapshot(driver_id)
            .ok_or(QueryError::DriverNotFound)?;
        let latest = snapshot.latest.ok_or(QueryError::NoData)?;

        Ok(LivePosition {
            driver_id: driver_id.to_string(),
            position: latest.coordinates,
            timestamp: latest.timestamp,
            speed: latest.speed,
        })
    }

    /// Vehicles within `radius_km` of the driver's latest position,
    /// nearest first. `None` uses the default radius of 5 km.
    ///
    /// The origin itself is never included, nor is any driver without a
    /// reading. Equal distances resolve to roster order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::live_position`]: the origin must be a
    /// roster member with at least one reading.
    pub fn nearby(&self, driver_id: &str, radius_km: Option<f64>) -> Result<NearbyReport, QueryError> {
        let radius = radius_km.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);

        let origin = self
            .store
            .snapshot(driver_id)
            .ok_or(QueryError::DriverNotFound)?;
        let center = origin.latest.ok_or(QueryError::NoData)?.coordinates;

        // Roster order feeds the stable sort's tie-break
        let candidates = self
            .store
            .roster()
            .iter()
            .filter(|id| id.as_str() != driver_id)
            .filter_map(|id| {
                let latest = self.store.snapshot(id)?.latest?;
                Some(Candidate {
                    driver_id: id.clone(),
                    position: latest.coordinates,
                    timestamp: latest.timestamp,
                })
            })
            .collect::<Vec<_>>();

        let nearby_vehicles = rank_nearby(&center, candidates, radius)
            .into_iter()
            .map(|ranked| NearbyVehicle {
                driver_id: ranked.driver_id,
                distance: round2(ranked.distance_km),
                position: ranked.position,
                timestamp: ranked.timestamp,
            })
            .collect();

        Ok(NearbyReport {
            radius,
            center,
            nearby_vehicles,
        })
    }

    /// The last `limit` history entries for the driver, oldest-first
    /// within the slice. `None` uses the default limit of 10; a limit
    /// larger than the stored history returns everything available.
    ///
    /// # Errors
    ///
    /// [`QueryError::DriverNotFound`] for identifiers outside the roster.
    /// A driver with no readings yields an empty slice, not an error.
    pub fn trip_history(
        &self,
        driver_id: &str,
        limit: Option<usize>,
    ) -> Result<TripHistory, QueryError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_QUERY_LIMIT);

        let snapshot = self
            .store
            .snapshot(driver_id)
            .ok_or(QueryError::DriverNotFound)?;

        let skip = snapshot.history.len().saturating_sub(limit);
        let positions = snapshot.history[skip..]
            .iter()
            .map(|reading| TripPosition {
                timestamp: reading.timestamp,
                coordinates: reading.coordinates,
                speed: reading.speed,
            })
            .collect();

        Ok(TripHistory {
            driver_id: driver_id.to_string(),
            trip_start: snapshot.trip_start,
            positions,
        })
    }
}

/// Round a distance to 2 decimal places for presentation.
#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
