//! Trip retention sweeper daemon.
//!
//! A repeating background task that walks the roster and ends trips that
//! have outlived the retention window, clearing their history. This is a
//! coarse simulation of trip boundaries: the sweep fires at a fixed
//! interval rather than per-driver timers, so a trip can be cleared up to
//! one full interval after its nominal expiry. That looseness is intended;
//! tests assert "eventually cleared", not "cleared exactly at expiry".

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::store::DriverStateStore;

/// Background daemon that periodically ends expired trips.
pub struct SweeperDaemon {
    store: Arc<DriverStateStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl SweeperDaemon {
    /// Create a sweeper daemon.
    ///
    /// # Arguments
    ///
    /// * `store` - Store whose trips are swept
    /// * `clock` - Time source for expiry checks
    /// * `interval` - Delay between sweeps (conventionally the retention window)
    pub fn new(store: Arc<DriverStateStore>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            store,
            clock,
            interval,
        }
    }

    /// Run until the token is cancelled.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The interval's first tick is immediate; skip it so the first real
        // sweep happens one full interval in.
        ticker.tick().await;

        info!(
            interval_secs = self.interval.as_secs_f64(),
            "Retention sweeper started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Retention sweeper received shutdown signal");
                    break;
                }
                _ = ticker.tick() => {
                    self.sweep();
                }
            }
        }

        info!("Retention sweeper stopped");
    }

    /// One pass over the roster.
    fn sweep(&self) {
        let now = self.clock.now();
        for driver_id in self.store.roster() {
            if self.store.reset_if_expired(driver_id, now) {
                debug!(driver_id = %driver_id, "Trip expired, history cleared");
            }
        }
    }
}
