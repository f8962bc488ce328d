use super::domain::{Vehicle, VehicleId};
use serde::Serialize;

/// Severity of a single detected issue. Ordering is by escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// Detector that raised an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    InspectionTiming,
    RecurringFailure,
    RecentFailure,
    ServiceElapsed,
    ServiceOdometer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    pub text: String,
}

impl Issue {
    pub(crate) fn new(severity: Severity, kind: IssueKind, text: String) -> Self {
        Self {
            severity,
            kind,
            item: None,
            text,
        }
    }

    pub(crate) fn for_item(
        severity: Severity,
        kind: IssueKind,
        item: &str,
        text: String,
    ) -> Self {
        Self {
            severity,
            kind,
            item: Some(item.to_string()),
            text,
        }
    }
}

/// Overall verdict for one vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
    Warning,
    Critical,
    NoData,
}

impl HealthStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
            Self::NoData => "No Data",
        }
    }
}

impl From<Severity> for HealthStatus {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Warning => Self::Warning,
            Severity::Critical => Self::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleHealth {
    pub vehicle_id: VehicleId,
    pub code: String,
    pub brand: String,
    pub model: String,
    pub status: HealthStatus,
    pub status_label: &'static str,
    pub issues: Vec<Issue>,
    pub days_since_inspection: Option<i64>,
    pub days_since_maintenance: Option<i64>,
    pub baseline_interval_days: Option<f64>,
}

impl VehicleHealth {
    pub(crate) fn for_vehicle(vehicle: &Vehicle, status: HealthStatus) -> Self {
        Self {
            vehicle_id: vehicle.id.clone(),
            code: vehicle.code.clone(),
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            status,
            status_label: status.label(),
            issues: Vec::new(),
            days_since_inspection: None,
            days_since_maintenance: None,
            baseline_interval_days: None,
        }
    }

    pub fn count_with(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}

/// Fleet-wide bucket counts. Every active vehicle lands in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetSummary {
    pub critical: usize,
    pub warning: usize,
    pub ok: usize,
    pub no_data: usize,
    pub total_active: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetHealthResult {
    pub vehicles: Vec<VehicleHealth>,
    pub summary: FleetSummary,
}
