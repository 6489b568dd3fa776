//! Proximity ranking.
//!
//! Ranks candidate vehicle positions by great-circle distance from an
//! origin. Ordering is deterministic: results are sorted ascending on the
//! raw (unrounded) distance with a stable sort, so candidates at equal
//! distance keep the order they were supplied in. Callers supply
//! candidates in roster order to get the fixed-set tie-break.

use chrono::{DateTime, Utc};

use crate::coord::{great_circle_km, GeoPoint};

/// A candidate vehicle position to rank.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Driver identifier.
    pub driver_id: String,
    /// The candidate's latest position.
    pub position: GeoPoint,
    /// Timestamp of the latest reading.
    pub timestamp: DateTime<Utc>,
}

/// A candidate ranked by distance from the origin.
#[derive(Debug, Clone)]
pub struct RankedVehicle {
    /// Driver identifier.
    pub driver_id: String,
    /// Great-circle distance from the origin, in kilometers (unrounded).
    pub distance_km: f64,
    /// The candidate's latest position.
    pub position: GeoPoint,
    /// Timestamp of the latest reading.
    pub timestamp: DateTime<Utc>,
}

/// Rank candidates within `radius_km` of the origin, nearest first.
///
/// Candidates beyond the radius are dropped. The sort is stable, so ties
/// preserve input order.
pub fn rank_nearby(
    origin: &GeoPoint,
    candidates: impl IntoIterator<Item = Candidate>,
    radius_km: f64,
) -> Vec<RankedVehicle> {
    let mut ranked: Vec<RankedVehicle> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance_km = great_circle_km(origin, &candidate.position);
            (distance_km <= radius_km).then_some(RankedVehicle {
                driver_id: candidate.driver_id,
                distance_km,
                position: candidate.position,
                timestamp: candidate.timestamp,
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
