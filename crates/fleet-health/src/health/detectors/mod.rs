mod recent;
mod recurring;
mod service;
mod timing;

use super::config::HealthConfig;
use super::domain::{InspectionRecord, MaintenanceRecord};
use super::views::Issue;
use chrono::{DateTime, Utc};

/// One vehicle's history, normalized newest-first, plus the facts every detector shares.
pub(crate) struct VehicleHistory<'a> {
    pub inspections: Vec<&'a InspectionRecord>,
    pub maintenance: Vec<&'a MaintenanceRecord>,
    pub now: DateTime<Utc>,
    pub baseline_interval_days: Option<f64>,
}

impl<'a> VehicleHistory<'a> {
    pub fn new(
        inspections: &'a [InspectionRecord],
        maintenance: &'a [MaintenanceRecord],
        now: DateTime<Utc>,
    ) -> Self {
        let mut inspections: Vec<&InspectionRecord> = inspections.iter().collect();
        inspections.sort_by(|a, b| b.inspected_at.cmp(&a.inspected_at));
        let mut maintenance: Vec<&MaintenanceRecord> = maintenance.iter().collect();
        maintenance.sort_by(|a, b| b.serviced_at.cmp(&a.serviced_at));

        let timestamps: Vec<DateTime<Utc>> =
            inspections.iter().map(|record| record.inspected_at).collect();
        let baseline_interval_days = super::baseline::baseline_interval(&timestamps);

        Self {
            inspections,
            maintenance,
            now,
            baseline_interval_days,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inspections.is_empty() && self.maintenance.is_empty()
    }

    pub fn latest_inspection(&self) -> Option<&'a InspectionRecord> {
        self.inspections.first().copied()
    }

    pub fn latest_maintenance(&self) -> Option<&'a MaintenanceRecord> {
        self.maintenance.first().copied()
    }

    pub fn days_since_inspection(&self) -> Option<i64> {
        self.latest_inspection()
            .map(|record| (self.now - record.inspected_at).num_days())
    }

    pub fn days_since_maintenance(&self) -> Option<i64> {
        self.latest_maintenance()
            .map(|record| (self.now - record.serviced_at).num_days())
    }
}

/// Runs every detector in emission order: timing, recurring, recent, service.
pub(crate) fn detect_issues(history: &VehicleHistory<'_>, config: &HealthConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(timing::detect(history, config));
    issues.extend(recurring::detect(history, config));
    issues.extend(recent::detect(history, config));
    issues.extend(service::detect(history, config));
    issues
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::health::views::IssueKind;

    #[test]
    fn history_is_normalized_newest_first() {
        let inspections = vec![inspection(30, &[]), inspection(2, &[]), inspection(16, &[])];
        let maintenance = vec![maintenance(100, None), maintenance(20, None)];
        let history = VehicleHistory::new(&inspections, &maintenance, now());

        assert_eq!(history.days_since_inspection(), Some(2));
        assert_eq!(history.days_since_maintenance(), Some(20));
        assert_eq!(history.baseline_interval_days, Some(14.0));
    }

    #[test]
    fn emits_in_detector_order() {
        let inspections = vec![
            inspection(3, &[("wipers", "streaking")]),
            inspection(40, &[("wipers", "streaking")]),
            inspection(50, &[]),
        ];
        let maintenance = vec![maintenance(200, None)];
        let history = VehicleHistory::new(&inspections, &maintenance, now());

        let kinds: Vec<IssueKind> = detect_issues(&history, &HealthConfig::default())
            .into_iter()
            .map(|issue| issue.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![
                IssueKind::RecurringFailure,
                IssueKind::RecentFailure,
                IssueKind::ServiceElapsed,
            ]
        );
    }
}
