use super::VehicleHistory;
use crate::health::config::HealthConfig;
use crate::health::views::{Issue, IssueKind, Severity};
use std::collections::BTreeMap;

/// Flags checklist items failing repeatedly across the most recent inspections.
pub(super) fn detect(history: &VehicleHistory<'_>, config: &HealthConfig) -> Vec<Issue> {
    let window = config.recurring_failure_window;
    if window == 0 || history.inspections.len() < window {
        return Vec::new();
    }

    let mut failures: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &history.inspections[..window] {
        for (key, _) in record.failed_items() {
            *failures.entry(key).or_default() += 1;
        }
    }

    failures
        .into_iter()
        .filter(|(_, count)| *count >= config.recurring_failure_threshold)
        .map(|(key, count)| {
            Issue::for_item(
                Severity::Warning,
                IssueKind::RecurringFailure,
                key,
                format!("{key} failed {count} of last {window} inspections"),
            )
        })
        .collect()
}
