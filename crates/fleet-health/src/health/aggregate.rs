use super::views::{HealthStatus, Issue, Severity};
use std::cmp::Reverse;

/// Collapses a vehicle's issues into one status and orders them critical-first.
///
/// The sort is stable, so issues of equal severity keep detector emission order.
pub(crate) fn aggregate(mut issues: Vec<Issue>) -> (HealthStatus, Vec<Issue>) {
    let status = issues
        .iter()
        .map(|issue| issue.severity)
        .max()
        .map(HealthStatus::from)
        .unwrap_or(HealthStatus::Ok);

    issues.sort_by_key(|issue| Reverse(issue.severity));
    (status, issues)
}
