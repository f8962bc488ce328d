use super::VehicleHistory;
use crate::health::config::HealthConfig;
use crate::health::views::{Issue, IssueKind, Severity};

/// Compares time since the last inspection against the vehicle's own cadence.
pub(super) fn detect(history: &VehicleHistory<'_>, config: &HealthConfig) -> Option<Issue> {
    let baseline = history.baseline_interval_days?;
    let days_since = history.days_since_inspection()?;
    let elapsed = days_since as f64;

    let severity = if elapsed > config.inspection_critical_multiplier * baseline {
        Severity::Critical
    } else if elapsed > config.inspection_warning_multiplier * baseline {
        Severity::Warning
    } else {
        return None;
    };

    Some(Issue::new(
        severity,
        IssueKind::InspectionTiming,
        format!(
            "No inspection for {days_since} days (usual interval {baseline:.1} days)"
        ),
    ))
}
