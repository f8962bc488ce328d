use super::HistoryLoadError;
use crate::health::domain::parse_timestamp;
use crate::health::{MaintenanceRecord, VehicleId};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Reads maintenance bills exported from the host spreadsheet.
///
/// Expected headers: `Vehicle ID`, `Date`, `Odometer`, `Supplier`, `Amount`, `Remarks`.
/// Unreadable odometer or amount cells are treated as absent; an unreadable date rejects
/// the file since the bill cannot be placed in history.
pub struct MaintenanceCsvImporter;

impl MaintenanceCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MaintenanceRecord>, HistoryLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<MaintenanceRecord>, HistoryLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, row) in csv_reader.deserialize::<MaintenanceRow>().enumerate() {
            let row = row?;
            let line = index + 2;
            let serviced_at =
                parse_timestamp(&row.date).ok_or_else(|| HistoryLoadError::InvalidDate {
                    row: line,
                    value: row.date.clone(),
                })?;

            let odometer_km = row.odometer.as_deref().and_then(|raw| {
                let parsed = parse_odometer(raw);
                if parsed.is_none() {
                    warn!(row = line, value = raw, "ignoring unreadable odometer reading");
                }
                parsed
            });
            let amount = row.amount.as_deref().and_then(parse_amount);

            records.push(MaintenanceRecord {
                vehicle_id: VehicleId::new(row.vehicle_id),
                serviced_at,
                odometer_km,
                supplier: row.supplier.unwrap_or_default(),
                amount,
                remarks: row.remarks,
            });
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct MaintenanceRow {
    #[serde(rename = "Vehicle ID")]
    vehicle_id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Odometer", default, deserialize_with = "empty_string_as_none")]
    odometer: Option<String>,
    #[serde(rename = "Supplier", default, deserialize_with = "empty_string_as_none")]
    supplier: Option<String>,
    #[serde(rename = "Amount", default, deserialize_with = "empty_string_as_none")]
    amount: Option<String>,
    #[serde(rename = "Remarks", default, deserialize_with = "empty_string_as_none")]
    remarks: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts thousands separators and a trailing `km` unit, e.g. `49,000 km`.
fn parse_odometer(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim()
        .trim_end_matches("km")
        .chars()
        .filter(|ch| !matches!(ch, ',' | ' ' | '_'))
        .collect();
    digits.parse().ok()
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|ch| *ch != ',').collect();
    cleaned.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_bills_with_loose_formatting() {
        let csv = "Vehicle ID,Date,Odometer,Supplier,Amount,Remarks\n\
VH-01,2025-04-15,\"49,000 km\",Northside Garage,\"1,250.50\",Oil and filters\n\
VH-02,2025-05-02T10:00:00Z,,Quick Fit,,\n";

        let records = MaintenanceCsvImporter::from_reader(csv.as_bytes()).expect("import succeeds");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].odometer_km, Some(49_000));
        assert_eq!(records[0].amount, Some(1250.5));
        assert_eq!(records[0].remarks.as_deref(), Some("Oil and filters"));
        assert_eq!(records[1].vehicle_id, VehicleId::new("VH-02"));
        assert!(records[1].odometer_km.is_none());
        assert!(records[1].remarks.is_none());
    }

    #[test]
    fn unreadable_odometer_is_absent() {
        let csv = "Vehicle ID,Date,Odometer,Supplier,Amount,Remarks\n\
VH-01,2025-04-15,unknown,Northside Garage,300,\n";

        let records = MaintenanceCsvImporter::from_reader(csv.as_bytes()).expect("import succeeds");

        assert!(records[0].odometer_km.is_none());
    }

    #[test]
    fn rejects_unreadable_dates() {
        let csv = "Vehicle ID,Date,Odometer,Supplier,Amount,Remarks\n\
VH-01,15/04/2025,49000,Northside Garage,300,\n";

        let err = MaintenanceCsvImporter::from_reader(csv.as_bytes()).expect_err("bad date fails");

        match err {
            HistoryLoadError::InvalidDate { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "15/04/2025");
            }
            other => panic!("expected invalid date, got {other:?}"),
        }
    }
}
