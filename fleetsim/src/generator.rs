//! Telemetry generation: reading factory and producer daemon.
//!
//! # Architecture
//!
//! [`ReadingFactory`] composes one full [`TelemetryReading`] per call from
//! the coordinate sampler and the configured ranges. [`ProducerDaemon`]
//! drives it: a repeating tokio task that generates one reading per tick
//! and applies it to the store, running until cancelled.
//!
//! # Update cadence
//!
//! Each tick picks one roster driver uniformly at random, so a single tick
//! updates a single driver and per-driver update cadence is uneven. A
//! driver can go many intervals without a fresh reading. Consumers must
//! tolerate this; it is intended feed behavior, not a scheduling bug.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::coord::BoundingRegion;
use crate::reading::TelemetryReading;
use crate::sampler::sample_point;
use crate::store::DriverStateStore;

/// Composes full telemetry readings from an injected RNG.
pub struct ReadingFactory<R: Rng> {
    rng: R,
    region: BoundingRegion,
    roster: Vec<String>,
    max_speed_kph: u32,
}

impl<R: Rng> ReadingFactory<R> {
    /// Create a factory over the given roster and ranges.
    ///
    /// # Panics
    ///
    /// Panics if the roster is empty; a fleet without drivers is a
    /// configuration bug, not a runtime condition.
    pub fn new(rng: R, region: BoundingRegion, roster: Vec<String>, max_speed_kph: u32) -> Self {
        assert!(!roster.is_empty(), "driver roster must not be empty");
        Self {
            rng,
            region,
            roster,
            max_speed_kph,
        }
    }

    /// Generate one reading for a uniformly chosen roster driver.
    ///
    /// Speed is drawn from `[0, max_speed]`, fuel from `[0, 100]` rounded
    /// to one decimal place, position from the sampling region.
    pub fn next_reading(&mut self, now: DateTime<Utc>) -> TelemetryReading {
        let index = self.rng.random_range(0..self.roster.len());
        let driver_id = self.roster[index].clone();
        let coordinates = sample_point(&mut self.rng, &self.region);
        let speed = self.rng.random_range(0..=self.max_speed_kph);
        let fuel_level = (self.rng.random_range(0.0..=100.0_f64) * 10.0).round() / 10.0;

        TelemetryReading {
            timestamp: now,
            coordinates,
            speed,
            fuel_level,
            driver_id,
        }
    }
}

/// Background daemon that feeds the store with generated readings.
///
/// One reading is generated and applied per tick. The daemon runs for the
/// process lifetime and stops promptly when the cancellation token fires,
/// without waiting out the current interval.
pub struct ProducerDaemon<R: Rng + Send> {
    store: Arc<DriverStateStore>,
    factory: ReadingFactory<R>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl<R: Rng + Send> ProducerDaemon<R> {
    /// Create a producer daemon.
    ///
    /// # Arguments
    ///
    /// * `store` - Store receiving the generated readings
    /// * `factory` - Reading factory (owns the RNG)
    /// * `clock` - Time source for reading timestamps
    /// * `interval` - Delay between ticks
    pub fn new(
        store: Arc<DriverStateStore>,
        factory: ReadingFactory<R>,
        clock: Arc<dyn Clock>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            factory,
            clock,
            interval,
        }
    }

    /// Run until the token is cancelled.
    ///
    /// The first reading is generated immediately; subsequent readings
    /// follow at the configured interval.
    pub async fn run(mut self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = self.interval.as_secs_f64(),
            "Telemetry producer started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Telemetry producer received shutdown signal");
                    break;
                }
                _ = ticker.tick() => {
                    let reading = self.factory.next_reading(self.clock.now());
                    debug!(
                        driver_id = %reading.driver_id,
                        speed = reading.speed,
                        "Generated telemetry reading"
                    );
                    self.store.apply(reading);
                }
            }
        }

        info!("Telemetry producer stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, SystemClock};
    use crate::coord::GeoPoint;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_region() -> BoundingRegion {
        BoundingRegion::new(GeoPoint::new(23.7254, 90.4189), 0.1)
    }

    fn test_roster() -> Vec<String> {
        vec!["A".to_string(), "B".to_string(), "C".to_string()]
    }

    fn test_factory(seed: u64) -> ReadingFactory<StdRng> {
        ReadingFactory::new(StdRng::seed_from_u64(seed), test_region(), test_roster(), 60)
    }

    #[test]
    fn test_factory_output_within_configured_ranges() {
        let mut factory = test_factory(1);
        let now: DateTime<Utc> = "2026-08-30T12:00:00Z".parse().unwrap();
        let region = test_region();
        let roster = test_roster();

        for _ in 0..500 {
            let reading = factory.next_reading(now);
            assert!(reading.speed <= 60);
            assert!((0.0..=100.0).contains(&reading.fuel_level));
            assert_eq!(reading.fuel_level, (reading.fuel_level * 10.0).round() / 10.0);
            assert!(region.contains(&reading.coordinates));
            assert!(roster.contains(&reading.driver_id));
            assert_eq!(reading.timestamp, now);
        }
    }

    #[test]
    fn test_factory_is_deterministic_under_seed() {
        let now: DateTime<Utc> = "2026-08-30T12:00:00Z".parse().unwrap();
        let mut a = test_factory(42);
        let mut b = test_factory(42);

        for _ in 0..20 {
            assert_eq!(a.next_reading(now), b.next_reading(now));
        }
    }

    #[test]
    fn test_factory_eventually_covers_roster() {
        // Random driver per tick: any single driver may lag, but over many
        // ticks every roster member gets readings.
        let mut factory = test_factory(3);
        let now: DateTime<Utc> = "2026-08-30T12:00:00Z".parse().unwrap();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(factory.next_reading(now).driver_id);
        }
        assert_eq!(seen.len(), test_roster().len());
    }

    #[test]
    #[should_panic(expected = "roster must not be empty")]
    fn test_factory_rejects_empty_roster() {
        ReadingFactory::new(StdRng::seed_from_u64(0), test_region(), Vec::new(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn test_producer_applies_readings_until_cancelled() {
        let now: DateTime<Utc> = "2026-08-30T12:00:00Z".parse().unwrap();
        let store = Arc::new(DriverStateStore::new(
            test_roster(),
            100,
            Duration::from_secs(600),
            now,
        ));

        let daemon = ProducerDaemon::new(
            Arc::clone(&store),
            test_factory(7),
            Arc::new(ManualClock::new(now)),
            Duration::from_secs(5),
        );

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(daemon.run(cancel.clone()));

        // First tick fires immediately, then every 5 seconds
        tokio::time::sleep(Duration::from_millis(10)).await;
        tokio::time::sleep(Duration::from_secs(16)).await;

        cancel.cancel();
        handle.await.unwrap();

        let total: usize = store
            .roster()
            .iter()
            .map(|id| store.snapshot(id).unwrap().history.len())
            .sum();
        assert!(total >= 4, "Expected at least 4 readings, got {}", total);
    }

    #[tokio::test(start_paused = true)]
    async fn test_producer_stops_promptly_on_cancel() {
        let store = Arc::new(DriverStateStore::new(
            test_roster(),
            100,
            Duration::from_secs(600),
            Utc::now(),
        ));

        // Long interval: shutdown must not wait a tick out
        let daemon = ProducerDaemon::new(
            Arc::clone(&store),
            test_factory(7),
            Arc::new(SystemClock),
            Duration::from_secs(3600),
        );

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(daemon.run(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("producer did not stop on cancellation")
            .unwrap();
    }
}
