//! Concurrent per-driver telemetry store.
//!
//! The store holds one record per roster driver: the latest reading, a
//! bounded oldest-first history, and the start of the current trip window.
//! It is the only mutable shared state in the system, continuously written
//! by the producer and sweeper while query handlers read it.
//!
//! # Concurrency
//!
//! The roster is fixed at construction, so the record map itself is never
//! mutated and needs no lock. Each record sits behind its own
//! `parking_lot::RwLock`:
//!
//! - `apply` and `reset_if_expired` take the write lock, so `latest` and
//!   `history` always change together and writers to the same driver are
//!   serialized.
//! - `snapshot` takes the read lock and clones all three fields, so a
//!   reader observes a record entirely before or entirely after any
//!   concurrent update, never partially.
//!
//! Updates to different drivers never contend.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use tracing::warn;

use crate::reading::TelemetryReading;

/// Per-driver mutable state.
#[derive(Debug)]
struct DriverRecord {
    /// Most recent reading, absent until the first one arrives.
    latest: Option<TelemetryReading>,
    /// Readings oldest-first, bounded at the history limit.
    history: VecDeque<TelemetryReading>,
    /// Start of the current trip window.
    trip_start: DateTime<Utc>,
}

/// Consistent point-in-time copy of one driver's record.
#[derive(Debug, Clone)]
pub struct DriverSnapshot {
    /// Most recent reading, if any.
    pub latest: Option<TelemetryReading>,
    /// Full retained history, oldest-first.
    pub history: Vec<TelemetryReading>,
    /// Start of the current trip window.
    pub trip_start: DateTime<Utc>,
}

/// Concurrent store of per-driver telemetry records.
pub struct DriverStateStore {
    /// One record per roster driver. The map is immutable after construction.
    records: HashMap<String, RwLock<DriverRecord>>,

    /// Roster in its fixed enumeration order. This order is the tie-break
    /// order for proximity ranking.
    roster: Vec<String>,

    /// Maximum readings retained per driver.
    history_limit: usize,

    /// Trip retention window.
    retention: TimeDelta,
}

impl DriverStateStore {
    /// Create a store with one empty record per roster driver.
    ///
    /// # Arguments
    ///
    /// * `roster` - Fixed driver identifier set
    /// * `history_limit` - Maximum readings retained per driver
    /// * `retention` - Trip retention window
    /// * `now` - Initial trip start for every driver
    pub fn new(
        roster: Vec<String>,
        history_limit: usize,
        retention: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let records = roster
            .iter()
            .map(|id| {
                let record = DriverRecord {
                    latest: None,
                    history: VecDeque::with_capacity(history_limit),
                    trip_start: now,
                };
                (id.clone(), RwLock::new(record))
            })
            .collect();

        Self {
            records,
            roster,
            history_limit,
            retention: TimeDelta::from_std(retention).unwrap_or(TimeDelta::MAX),
        }
    }

    /// The fixed driver roster, in enumeration order.
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Whether the identifier is a roster member.
    pub fn contains(&self, driver_id: &str) -> bool {
        self.records.contains_key(driver_id)
    }

    /// Apply a reading: update `latest` and append to the driver's history,
    /// evicting the oldest entry when the history limit is exceeded.
    ///
    /// Both fields change under one write lock, so no reader can observe
    /// `latest` out of step with the history tail.
    ///
    /// Readings for identifiers outside the roster indicate a bug in the
    /// generator and are dropped with a warning.
    pub fn apply(&self, reading: TelemetryReading) {
        let Some(record) = self.records.get(&reading.driver_id) else {
            warn!(driver_id = %reading.driver_id, "Dropping reading for unknown driver");
            return;
        };

        let mut record = record.write();
        record.latest = Some(reading.clone());
        record.history.push_back(reading);
        while record.history.len() > self.history_limit {
            record.history.pop_front();
        }
    }

    /// Take a consistent snapshot of one driver's record.
    ///
    /// Returns `None` when the identifier is outside the roster.
    pub fn snapshot(&self, driver_id: &str) -> Option<DriverSnapshot> {
        let record = self.records.get(driver_id)?.read();
        Some(DriverSnapshot {
            latest: record.latest.clone(),
            history: record.history.iter().cloned().collect(),
            trip_start: record.trip_start,
        })
    }

    /// End the driver's trip if it has outlived the retention window.
    ///
    /// When `now - trip_start` exceeds the window, the history is cleared
    /// and a new trip starts at `now`. Otherwise this is a no-op. Calling
    /// it twice in a row is safe: the first call resets `trip_start`, so
    /// the second sees a fresh trip.
    ///
    /// Returns `true` when a reset happened, `false` for a no-op or an
    /// unknown identifier.
    pub fn reset_if_expired(&self, driver_id: &str, now: DateTime<Utc>) -> bool {
        let Some(record) = self.records.get(driver_id) else {
            return false;
        };

        let mut record = record.write();
        if now - record.trip_start > self.retention {
            record.history.clear();
            record.trip_start = now;
            true
        } else {
            false
        }
    }
}
