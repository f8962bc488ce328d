use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for vehicles registered in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl VehicleId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry entry for a vehicle. Inactive vehicles are ignored by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub code: String,
    pub brand: String,
    pub model: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Outcome of one checklist criterion within an inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub passed: bool,
    #[serde(default)]
    pub remark: Option<String>,
}

impl ChecklistEntry {
    pub fn passed() -> Self {
        Self {
            passed: true,
            remark: None,
        }
    }

    pub fn failed(remark: impl Into<String>) -> Self {
        Self {
            passed: false,
            remark: Some(remark.into()),
        }
    }

    /// Remark text, empty when the upstream record omitted it.
    pub fn remark(&self) -> &str {
        self.remark.as_deref().unwrap_or("")
    }
}

/// A completed vehicle inspection with its checklist results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub vehicle_id: VehicleId,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub inspected_at: DateTime<Utc>,
    #[serde(default)]
    pub odometer_km: Option<u32>,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub checklist: BTreeMap<String, ChecklistEntry>,
}

impl InspectionRecord {
    /// Checklist items recorded as failed, in key order.
    pub fn failed_items(&self) -> impl Iterator<Item = (&str, &ChecklistEntry)> {
        self.checklist
            .iter()
            .filter(|(_, entry)| !entry.passed)
            .map(|(key, entry)| (key.as_str(), entry))
    }
}

/// A maintenance bill recorded against a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub vehicle_id: VehicleId,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub serviced_at: DateTime<Utc>,
    #[serde(default)]
    pub odometer_km: Option<u32>,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}
