//! Fleet service orchestrator.
//!
//! Coordinates startup, operation and shutdown of the simulation:
//!
//! 1. Builds the driver store from the configured roster
//! 2. Spawns the telemetry producer and retention sweeper daemons under a
//!    shared cancellation token
//! 3. Exposes the read-only [`QueryService`] for the HTTP layer
//!
//! # Example
//!
//! ```ignore
//! use fleetsim::config::FleetConfig;
//! use fleetsim::service::FleetService;
//!
//! let service = FleetService::start(FleetConfig::default());
//! let router = fleetsim::api::router(service.query());
//!
//! // ... serve the router ...
//!
//! service.shutdown().await;
//! ```

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::config::FleetConfig;
use crate::generator::{ProducerDaemon, ReadingFactory};
use crate::query::QueryService;
use crate::retention::SweeperDaemon;
use crate::store::DriverStateStore;

/// A running fleet simulation: store, producer and sweeper.
///
/// Construction spawns the background daemons, so it must happen inside a
/// tokio runtime. Dropping the handle leaves the daemons running;
/// [`FleetService::shutdown`] stops them deterministically.
pub struct FleetService {
    store: Arc<DriverStateStore>,
    query: QueryService,
    cancel: CancellationToken,
    producer: JoinHandle<()>,
    sweeper: JoinHandle<()>,
}

impl FleetService {
    /// Start the simulation on the wall clock.
    pub fn start(config: FleetConfig) -> Self {
        Self::start_with_clock(config, Arc::new(SystemClock))
    }

    /// Start the simulation with an injected clock (used by tests to
    /// control retention without real waiting).
    pub fn start_with_clock(config: FleetConfig, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let store = Arc::new(DriverStateStore::new(
            config.drivers.clone(),
            config.history_limit,
            config.retention,
            now,
        ));

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let factory = ReadingFactory::new(rng, config.region, config.drivers, config.max_speed_kph);

        let cancel = CancellationToken::new();
        let producer = tokio::spawn(
            ProducerDaemon::new(
                Arc::clone(&store),
                factory,
                Arc::clone(&clock),
                config.update_interval,
            )
            .run(cancel.clone()),
        );
        let sweeper = tokio::spawn(
            SweeperDaemon::new(Arc::clone(&store), clock, config.retention).run(cancel.clone()),
        );

        info!(
            drivers = store.roster().len(),
            update_interval_secs = config.update_interval.as_secs_f64(),
            retention_secs = config.retention.as_secs_f64(),
            "Fleet service started"
        );

        Self {
            query: QueryService::new(Arc::clone(&store)),
            store,
            cancel,
            producer,
            sweeper,
        }
    }

    /// Handle for read-only queries.
    pub fn query(&self) -> QueryService {
        self.query.clone()
    }

    /// Direct handle to the underlying store.
    pub fn store(&self) -> Arc<DriverStateStore> {
        Arc::clone(&self.store)
    }

    /// Cancel both daemons and wait for them to stop.
    pub async fn shutdown(self) {
        info!("Shutting down fleet service");
        self.cancel.cancel();
        let _ = self.producer.await;
        let _ = self.sweeper.await;
        info!("Fleet service stopped");
    }
}
