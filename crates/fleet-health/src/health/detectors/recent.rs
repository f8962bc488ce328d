use super::VehicleHistory;
use crate::health::config::HealthConfig;
use crate::health::views::{Issue, IssueKind, Severity};
use chrono::Duration;
use std::collections::HashSet;

/// Reports every item failed within the recent window, once per item, using the newest remark.
/// Safety-critical items escalate to critical regardless of frequency.
pub(super) fn detect(history: &VehicleHistory<'_>, config: &HealthConfig) -> Vec<Issue> {
    // a window too wide to represent covers the whole history
    let cutoff = Duration::try_days(config.recent_failure_window_days)
        .and_then(|window| history.now.checked_sub_signed(window));
    let mut seen: HashSet<&str> = HashSet::new();
    let mut issues = Vec::new();

    // newest-first, so the first sighting of a key carries the latest remark
    for record in history
        .inspections
        .iter()
        .take_while(|record| cutoff.map_or(true, |cutoff| record.inspected_at >= cutoff))
    {
        let inspected_on = record.inspected_at.date_naive();
        for (key, entry) in record.failed_items() {
            if !seen.insert(key) {
                continue;
            }

            let severity = if config.is_safety_critical(key) {
                Severity::Critical
            } else {
                Severity::Warning
            };
            let remark = entry.remark().trim();
            let text = if remark.is_empty() {
                format!("{key} failed on {inspected_on}")
            } else {
                format!("{key} failed on {inspected_on}: {remark}")
            };

            issues.push(Issue::for_item(severity, IssueKind::RecentFailure, key, text));
        }
    }

    issues
}
