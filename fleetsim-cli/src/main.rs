//! FleetSim CLI - Command-line interface
//!
//! Boots the simulation and serves the query API: parses flags, initializes
//! logging, starts the fleet service and runs the HTTP listener until
//! Ctrl-C, then shuts the background daemons down.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use fleetsim::config::{default_roster, FleetConfig};
use fleetsim::service::FleetService;

#[derive(Debug, Parser)]
#[command(name = "fleetsim", version = fleetsim::VERSION)]
#[command(about = "Simulated fleet-telemetry feed with live, proximity and trip-history queries")]
struct Cli {
    /// Port to serve the query API on
    #[arg(long, default_value_t = 5001)]
    port: u16,

    /// Seconds between generated readings
    #[arg(long, default_value_t = 5)]
    update_interval_secs: u64,

    /// Trip retention window in seconds (also the sweep interval)
    #[arg(long, default_value_t = 600)]
    retention_secs: u64,

    /// Maximum readings retained per driver
    #[arg(long, default_value_t = 100)]
    history_limit: usize,

    /// Number of drivers in the roster (named D_ID_1..D_ID_n)
    #[arg(long, default_value_t = 8)]
    drivers: usize,

    /// RNG seed for a reproducible feed
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn fleet_config(&self) -> FleetConfig {
        let mut config = FleetConfig::default()
            .with_update_interval(Duration::from_secs(self.update_interval_secs))
            .with_retention(Duration::from_secs(self.retention_secs))
            .with_history_limit(self.history_limit)
            .with_drivers(default_roster(self.drivers));
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    fleetsim::logging::init_logging();

    let service = FleetService::start(cli.fleet_config());
    let router = fleetsim::api::router(service.query());

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Serving fleet telemetry API");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Ctrl-C received");
        })
        .await?;

    service.shutdown().await;
    Ok(())
}
