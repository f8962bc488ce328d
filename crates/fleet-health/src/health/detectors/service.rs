use super::VehicleHistory;
use crate::health::config::HealthConfig;
use crate::health::views::{Issue, IssueKind, Severity};

pub(super) fn detect(history: &VehicleHistory<'_>, config: &HealthConfig) -> Vec<Issue> {
    elapsed(history, config)
        .into_iter()
        .chain(odometer_gap(history, config))
        .collect()
}

/// Time since the last maintenance; a single issue at the highest threshold reached.
fn elapsed(history: &VehicleHistory<'_>, config: &HealthConfig) -> Option<Issue> {
    let days = history.days_since_maintenance()?;

    let severity = if days >= config.service_critical_days {
        Severity::Critical
    } else if days >= config.service_warning_days {
        Severity::Warning
    } else {
        return None;
    };

    Some(Issue::new(
        severity,
        IssueKind::ServiceElapsed,
        format!("No maintenance recorded for {days} days"),
    ))
}

/// Distance driven since the last maintenance, read from the latest odometer readings.
fn odometer_gap(history: &VehicleHistory<'_>, config: &HealthConfig) -> Option<Issue> {
    let inspected_km = history.latest_inspection()?.odometer_km?;
    let serviced_km = history.latest_maintenance()?.odometer_km?;
    let gap = i64::from(inspected_km) - i64::from(serviced_km);

    if gap < config.odometer_gap_warning_km {
        return None;
    }

    Some(Issue::new(
        Severity::Warning,
        IssueKind::ServiceOdometer,
        format!("service may be due — {gap} km since last service"),
    ))
}
