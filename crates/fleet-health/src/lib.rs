//! Fleet health evaluation: turns inspection and maintenance history into per-vehicle
//! verdicts and a fleet-wide summary.

pub mod config;
pub mod error;
pub mod health;
pub mod history;
pub mod telemetry;

pub use health::{FleetHealthEngine, FleetHealthResult, FleetSummary, HealthConfig, VehicleHealth};
