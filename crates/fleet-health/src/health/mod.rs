mod aggregate;
mod baseline;
mod config;
mod detectors;
pub mod domain;
mod summary;
pub mod views;

pub use config::{HealthConfig, ThresholdError, DEFAULT_SAFETY_CRITICAL_ITEMS};
pub use domain::{ChecklistEntry, InspectionRecord, MaintenanceRecord, Vehicle, VehicleId};
pub use views::{
    FleetHealthResult, FleetSummary, HealthStatus, Issue, IssueKind, Severity, VehicleHealth,
};

use aggregate::aggregate;
use chrono::{DateTime, Utc};
use detectors::{detect_issues, VehicleHistory};
use std::collections::HashMap;
use tracing::{debug, info};

/// Stateless evaluator that applies the health thresholds to each vehicle's history.
#[derive(Debug, Clone, Default)]
pub struct FleetHealthEngine {
    config: HealthConfig,
}

impl FleetHealthEngine {
    pub fn new(config: HealthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Evaluates every active vehicle and summarizes the fleet.
    ///
    /// Verdicts are returned in the order the vehicles were supplied. Histories keyed by
    /// vehicles that are absent or inactive are ignored.
    pub fn evaluate(
        &self,
        vehicles: &[Vehicle],
        inspections_by_vehicle: &HashMap<VehicleId, Vec<InspectionRecord>>,
        maintenance_by_vehicle: &HashMap<VehicleId, Vec<MaintenanceRecord>>,
        now: DateTime<Utc>,
    ) -> FleetHealthResult {
        let verdicts: Vec<VehicleHealth> = vehicles
            .iter()
            .filter(|vehicle| vehicle.active)
            .map(|vehicle| {
                let inspections = inspections_by_vehicle
                    .get(&vehicle.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let maintenance = maintenance_by_vehicle
                    .get(&vehicle.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                self.evaluate_vehicle(vehicle, inspections, maintenance, now)
            })
            .collect();

        let summary = FleetSummary::from_verdicts(&verdicts);
        info!(
            total_active = summary.total_active,
            critical = summary.critical,
            warning = summary.warning,
            ok = summary.ok,
            no_data = summary.no_data,
            "fleet health evaluated"
        );

        FleetHealthResult {
            vehicles: verdicts,
            summary,
        }
    }

    /// Evaluates a single vehicle. History may be supplied in any order.
    pub fn evaluate_vehicle(
        &self,
        vehicle: &Vehicle,
        inspections: &[InspectionRecord],
        maintenance: &[MaintenanceRecord],
        now: DateTime<Utc>,
    ) -> VehicleHealth {
        let history = VehicleHistory::new(inspections, maintenance, now);

        if history.is_empty() {
            debug!(vehicle = %vehicle.id, "no inspection or maintenance history");
            return VehicleHealth::for_vehicle(vehicle, HealthStatus::NoData);
        }

        let (status, issues) = aggregate(detect_issues(&history, &self.config));
        debug!(
            vehicle = %vehicle.id,
            status = status.label(),
            issues = issues.len(),
            top_severity = issues.first().map(|issue| issue.severity.label()),
            "vehicle health evaluated"
        );

        VehicleHealth {
            issues,
            days_since_inspection: history.days_since_inspection(),
            days_since_maintenance: history.days_since_maintenance(),
            baseline_interval_days: history.baseline_interval_days,
            ..VehicleHealth::for_vehicle(vehicle, status)
        }
    }
}
