//! FleetSim - Simulated fleet-telemetry feed and geospatial query engine
//!
//! This library simulates a live telemetry feed for a fixed fleet of
//! vehicles inside a geographic boundary and answers three query classes
//! over the feed: last-known position, proximity search, and bounded trip
//! history.
//!
//! # High-Level API
//!
//! The [`service`] module provides the orchestrating facade:
//!
//! ```ignore
//! use fleetsim::config::FleetConfig;
//! use fleetsim::service::FleetService;
//!
//! let service = FleetService::start(FleetConfig::default());
//! let router = fleetsim::api::router(service.query());
//! ```
//!
//! # Architecture
//!
//! ```text
//! sampler ──► generator (producer daemon) ──► store ◄── retention (sweeper daemon)
//!                                               ▲
//!                                 query ◄── proximity
//!                                   ▲
//!                                  api
//! ```
//!
//! The store is the only mutable shared state: per-driver records behind
//! per-driver locks, written by the daemons and snapshot-read by queries.

pub mod api;
pub mod clock;
pub mod config;
pub mod coord;
pub mod generator;
pub mod logging;
pub mod proximity;
pub mod query;
pub mod reading;
pub mod retention;
pub mod sampler;
pub mod service;
pub mod store;

/// Version of the FleetSim library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
