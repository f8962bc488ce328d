use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Checklist keys whose failure is always escalated to critical.
pub const DEFAULT_SAFETY_CRITICAL_ITEMS: [&str; 4] =
    ["brakes", "tyres", "seat_belts", "dashboard_warning_lights"];

/// Longest recent-failure window accepted, roughly a century.
pub const MAX_RECENT_FAILURE_WINDOW_DAYS: i64 = 36_500;

/// Thresholds driving every detector. Defaults match the documented policy; the inspection
/// multipliers in particular are calibrated defaults and expected to be tuned per fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub inspection_warning_multiplier: f64,
    pub inspection_critical_multiplier: f64,
    pub recurring_failure_window: usize,
    pub recurring_failure_threshold: usize,
    pub recent_failure_window_days: i64,
    pub safety_critical_item_keys: BTreeSet<String>,
    pub service_warning_days: i64,
    pub service_critical_days: i64,
    pub odometer_gap_warning_km: i64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            inspection_warning_multiplier: 1.5,
            inspection_critical_multiplier: 2.0,
            recurring_failure_window: 3,
            recurring_failure_threshold: 2,
            recent_failure_window_days: 10,
            safety_critical_item_keys: DEFAULT_SAFETY_CRITICAL_ITEMS
                .iter()
                .map(|key| key.to_string())
                .collect(),
            service_warning_days: 90,
            service_critical_days: 180,
            odometer_gap_warning_km: 5_000,
        }
    }
}

impl HealthConfig {
    pub fn is_safety_critical(&self, item_key: &str) -> bool {
        self.safety_critical_item_keys.contains(item_key)
    }

    /// Rejects threshold combinations that would make severities unreachable or inverted.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for multiplier in [
            self.inspection_warning_multiplier,
            self.inspection_critical_multiplier,
        ] {
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(ThresholdError::InvalidMultiplier(multiplier));
            }
        }
        if self.inspection_critical_multiplier < self.inspection_warning_multiplier {
            return Err(ThresholdError::InvertedMultipliers {
                warning: self.inspection_warning_multiplier,
                critical: self.inspection_critical_multiplier,
            });
        }
        if self.recurring_failure_window == 0 {
            return Err(ThresholdError::EmptyRecurringWindow);
        }
        if self.recurring_failure_threshold == 0
            || self.recurring_failure_threshold > self.recurring_failure_window
        {
            return Err(ThresholdError::RecurringThresholdOutOfRange {
                threshold: self.recurring_failure_threshold,
                window: self.recurring_failure_window,
            });
        }
        if self.recent_failure_window_days < 0 {
            return Err(ThresholdError::NegativeRecentWindow(
                self.recent_failure_window_days,
            ));
        }
        if self.recent_failure_window_days > MAX_RECENT_FAILURE_WINDOW_DAYS {
            return Err(ThresholdError::RecentWindowTooLong(
                self.recent_failure_window_days,
            ));
        }
        if self.service_critical_days < self.service_warning_days {
            return Err(ThresholdError::InvertedServiceDays {
                warning: self.service_warning_days,
                critical: self.service_critical_days,
            });
        }
        if self.odometer_gap_warning_km <= 0 {
            return Err(ThresholdError::NonPositiveOdometerGap(
                self.odometer_gap_warning_km,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("inspection multipliers must be finite and positive (got {0})")]
    InvalidMultiplier(f64),
    #[error("inspection critical multiplier {critical} is below warning multiplier {warning}")]
    InvertedMultipliers { warning: f64, critical: f64 },
    #[error("recurring failure window must cover at least one inspection")]
    EmptyRecurringWindow,
    #[error("recurring failure threshold {threshold} must be between 1 and window {window}")]
    RecurringThresholdOutOfRange { threshold: usize, window: usize },
    #[error("recent failure window must not be negative (got {0} days)")]
    NegativeRecentWindow(i64),
    #[error("recent failure window of {0} days exceeds {max}", max = MAX_RECENT_FAILURE_WINDOW_DAYS)]
    RecentWindowTooLong(i64),
    #[error("service critical days {critical} is below service warning days {warning}")]
    InvertedServiceDays { warning: i64, critical: i64 },
    #[error("odometer gap threshold must be positive (got {0} km)")]
    NonPositiveOdometerGap(i64),
}
