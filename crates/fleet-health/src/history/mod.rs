//! Adapters that hand the engine its per-vehicle history. Persistence lives elsewhere; these
//! read exported snapshots so the CLI and HTTP surfaces can drive an evaluation.

mod maintenance_csv;
mod snapshot;

pub use maintenance_csv::MaintenanceCsvImporter;
pub use snapshot::FleetSnapshot;

use crate::health::{
    FleetHealthEngine, FleetHealthResult, InspectionRecord, MaintenanceRecord, Vehicle, VehicleId,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum HistoryLoadError {
    #[error("failed to read history export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid fleet snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid maintenance CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("maintenance row {row} has an unreadable date '{value}'")]
    InvalidDate { row: usize, value: String },
}

/// Vehicles plus their histories grouped per vehicle, each sorted newest-first.
#[derive(Debug, Clone, Default)]
pub struct FleetHistories {
    pub vehicles: Vec<Vehicle>,
    pub inspections: HashMap<VehicleId, Vec<InspectionRecord>>,
    pub maintenance: HashMap<VehicleId, Vec<MaintenanceRecord>>,
}

impl FleetHistories {
    pub fn evaluate(&self, engine: &FleetHealthEngine, now: DateTime<Utc>) -> FleetHealthResult {
        engine.evaluate(&self.vehicles, &self.inspections, &self.maintenance, now)
    }
}
