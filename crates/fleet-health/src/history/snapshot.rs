use super::{FleetHistories, HistoryLoadError};
use crate::health::{InspectionRecord, MaintenanceRecord, Vehicle, VehicleId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Flat export of the fleet registry and its records, as produced by the host application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub inspections: Vec<InspectionRecord>,
    #[serde(default)]
    pub maintenance: Vec<MaintenanceRecord>,
}

impl FleetSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, HistoryLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, HistoryLoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Appends maintenance records loaded from another export (e.g. a bill CSV).
    pub fn extend_maintenance<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = MaintenanceRecord>,
    {
        self.maintenance.extend(records);
    }

    pub fn into_histories(self) -> FleetHistories {
        let mut inspections: HashMap<VehicleId, Vec<InspectionRecord>> = HashMap::new();
        for record in self.inspections {
            inspections
                .entry(record.vehicle_id.clone())
                .or_default()
                .push(record);
        }
        for records in inspections.values_mut() {
            records.sort_by(|a, b| b.inspected_at.cmp(&a.inspected_at));
        }

        let mut maintenance: HashMap<VehicleId, Vec<MaintenanceRecord>> = HashMap::new();
        for record in self.maintenance {
            maintenance
                .entry(record.vehicle_id.clone())
                .or_default()
                .push(record);
        }
        for records in maintenance.values_mut() {
            records.sort_by(|a, b| b.serviced_at.cmp(&a.serviced_at));
        }

        FleetHistories {
            vehicles: self.vehicles,
            inspections,
            maintenance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "vehicles": [
            { "id": "VH-01", "code": "T-101", "brand": "Isuzu", "model": "N-Series" },
            { "id": "VH-02", "code": "T-102", "brand": "Hino", "model": "300", "active": false }
        ],
        "inspections": [
            { "vehicle_id": "VH-01", "inspected_at": "2025-05-01", "odometer_km": 48000 },
            { "vehicle_id": "VH-01", "inspected_at": "2025-06-01T08:00:00Z", "odometer_km": 51000 }
        ],
        "maintenance": [
            { "vehicle_id": "VH-01", "serviced_at": "2025-04-15", "supplier": "Northside Garage" }
        ]
    }"#;

    #[test]
    fn groups_and_sorts_newest_first() {
        let snapshot = FleetSnapshot::from_reader(SNAPSHOT.as_bytes()).expect("snapshot parses");
        assert!(snapshot.vehicles[0].active);
        assert!(!snapshot.vehicles[1].active);

        let histories = snapshot.into_histories();
        let inspections = histories
            .inspections
            .get(&VehicleId::new("VH-01"))
            .expect("inspections grouped");

        assert_eq!(inspections.len(), 2);
        assert_eq!(inspections[0].odometer_km, Some(51_000));
        assert_eq!(
            histories
                .maintenance
                .get(&VehicleId::new("VH-01"))
                .map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn rejects_malformed_json() {
        let err = FleetSnapshot::from_reader("{ \"vehicles\": [".as_bytes())
            .expect_err("truncated snapshot fails");
        assert!(matches!(err, HistoryLoadError::Json(_)));
    }

    #[test]
    fn rejects_unreadable_timestamps() {
        let raw = r#"{ "inspections": [ { "vehicle_id": "VH-01", "inspected_at": "yesterday" } ] }"#;
        assert!(FleetSnapshot::from_reader(raw.as_bytes()).is_err());
    }
}
