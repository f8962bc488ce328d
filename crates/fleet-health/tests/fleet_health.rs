use chrono::{DateTime, Duration, TimeZone, Utc};
use fleet_health::health::{
    ChecklistEntry, FleetHealthEngine, HealthConfig, HealthStatus, InspectionRecord, IssueKind,
    MaintenanceRecord, Severity, Vehicle, VehicleHealth, VehicleId,
};
use std::collections::{BTreeMap, HashMap};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 24, 14, 0, 0)
        .single()
        .expect("valid evaluation time")
}

fn vehicle(id: &str) -> Vehicle {
    Vehicle {
        id: VehicleId::new(id),
        code: format!("T-{id}"),
        brand: "Isuzu".to_string(),
        model: "N-Series".to_string(),
        active: true,
    }
}

fn inspection(id: &str, days_ago: i64, failures: &[(&str, &str)]) -> InspectionRecord {
    let mut checklist = BTreeMap::new();
    checklist.insert("horn".to_string(), ChecklistEntry::passed());
    for (key, remark) in failures {
        checklist.insert(key.to_string(), ChecklistEntry::failed(*remark));
    }
    InspectionRecord {
        vehicle_id: VehicleId::new(id),
        inspected_at: now() - Duration::days(days_ago),
        odometer_km: None,
        driver_name: "J. Tan".to_string(),
        checklist,
    }
}

fn maintenance(id: &str, days_ago: i64, odometer_km: Option<u32>) -> MaintenanceRecord {
    MaintenanceRecord {
        vehicle_id: VehicleId::new(id),
        serviced_at: now() - Duration::days(days_ago),
        odometer_km,
        supplier: "Northside Garage".to_string(),
        amount: Some(310.0),
        remarks: Some("Routine service".to_string()),
    }
}

fn evaluate_one(
    inspections: Vec<InspectionRecord>,
    maintenance: Vec<MaintenanceRecord>,
) -> VehicleHealth {
    FleetHealthEngine::default().evaluate_vehicle(&vehicle("VH-01"), &inspections, &maintenance, now())
}

struct Fleet {
    vehicles: Vec<Vehicle>,
    inspections: HashMap<VehicleId, Vec<InspectionRecord>>,
    maintenance: HashMap<VehicleId, Vec<MaintenanceRecord>>,
}

fn mixed_fleet() -> Fleet {
    let mut inspections = HashMap::new();
    let mut maintenance_map = HashMap::new();

    // healthy: regular cadence, recent service
    inspections.insert(
        VehicleId::new("ok"),
        vec![
            inspection("ok", 5, &[]),
            inspection("ok", 19, &[]),
            inspection("ok", 33, &[]),
        ],
    );
    maintenance_map.insert(VehicleId::new("ok"), vec![maintenance("ok", 30, None)]);

    // recurring non-safety failure
    inspections.insert(
        VehicleId::new("warn"),
        vec![
            inspection("warn", 12, &[("wipers", "streaking")]),
            inspection("warn", 26, &[]),
            inspection("warn", 40, &[("wipers", "streaking")]),
        ],
    );

    // recent brake failure
    inspections.insert(
        VehicleId::new("crit"),
        vec![inspection("crit", 2, &[("brakes", "pulls left")])],
    );

    let mut retired = vehicle("retired");
    retired.active = false;
    inspections.insert(
        VehicleId::new("retired"),
        vec![inspection("retired", 1, &[("brakes", "seized")])],
    );

    Fleet {
        vehicles: vec![
            vehicle("ok"),
            vehicle("warn"),
            vehicle("crit"),
            vehicle("empty"),
            retired,
        ],
        inspections,
        maintenance: maintenance_map,
    }
}

#[test]
fn summarizes_a_mixed_fleet() {
    let fleet = mixed_fleet();
    let result = FleetHealthEngine::default().evaluate(
        &fleet.vehicles,
        &fleet.inspections,
        &fleet.maintenance,
        now(),
    );

    let statuses: Vec<(&str, HealthStatus)> = result
        .vehicles
        .iter()
        .map(|health| (health.vehicle_id.as_str(), health.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("ok", HealthStatus::Ok),
            ("warn", HealthStatus::Warning),
            ("crit", HealthStatus::Critical),
            ("empty", HealthStatus::NoData),
        ]
    );

    let summary = result.summary;
    assert_eq!(summary.critical, 1);
    assert_eq!(summary.warning, 1);
    assert_eq!(summary.ok, 1);
    assert_eq!(summary.no_data, 1);
    assert_eq!(summary.total_active, 4);
    assert_eq!(
        summary.critical + summary.warning + summary.ok + summary.no_data,
        summary.total_active
    );
}

#[test]
fn status_tracks_issue_severities() {
    let fleet = mixed_fleet();
    let result = FleetHealthEngine::default().evaluate(
        &fleet.vehicles,
        &fleet.inspections,
        &fleet.maintenance,
        now(),
    );

    for health in result
        .vehicles
        .iter()
        .filter(|health| health.status != HealthStatus::NoData)
    {
        let expected = if health.count_with(Severity::Critical) > 0 {
            HealthStatus::Critical
        } else if health.count_with(Severity::Warning) > 0 {
            HealthStatus::Warning
        } else {
            HealthStatus::Ok
        };
        assert_eq!(health.status, expected, "vehicle {}", health.vehicle_id);
    }
}

#[test]
fn repeated_evaluation_is_byte_identical() {
    let fleet = mixed_fleet();
    let engine = FleetHealthEngine::default();

    let first = engine.evaluate(&fleet.vehicles, &fleet.inspections, &fleet.maintenance, now());
    let second = engine.evaluate(&fleet.vehicles, &fleet.inspections, &fleet.maintenance, now());

    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn vehicle_without_history_is_no_data() {
    let health = evaluate_one(Vec::new(), Vec::new());

    assert_eq!(health.status, HealthStatus::NoData);
    assert!(health.issues.is_empty());
    assert!(health.days_since_inspection.is_none());
    assert!(health.days_since_maintenance.is_none());
}

#[test]
fn maintenance_only_history_is_judged() {
    let health = evaluate_one(Vec::new(), vec![maintenance("VH-01", 20, Some(30_000))]);

    assert_eq!(health.status, HealthStatus::Ok);
    assert_eq!(health.days_since_maintenance, Some(20));
}

#[test]
fn single_recent_inspection_has_no_timing_issue() {
    let health = evaluate_one(vec![inspection("VH-01", 5, &[])], Vec::new());

    assert!(health
        .issues
        .iter()
        .all(|issue| issue.kind != IssueKind::InspectionTiming));
    assert!(health.baseline_interval_days.is_none());
    assert_eq!(health.status, HealthStatus::Ok);
}

#[test]
fn recurring_failure_reports_two_of_three() {
    let health = evaluate_one(
        vec![
            inspection("VH-01", 20, &[("brake_pads", "3mm remaining")]),
            inspection("VH-01", 35, &[]),
            inspection("VH-01", 50, &[("brake_pads", "4mm remaining")]),
        ],
        Vec::new(),
    );

    let recurring: Vec<_> = health
        .issues
        .iter()
        .filter(|issue| issue.kind == IssueKind::RecurringFailure)
        .collect();
    assert_eq!(recurring.len(), 1);
    assert_eq!(recurring[0].severity, Severity::Warning);
    assert_eq!(recurring[0].item.as_deref(), Some("brake_pads"));
    assert!(recurring[0].text.contains("brake_pads"));
    assert!(recurring[0].text.contains("2 of last 3"));
}

#[test]
fn recent_brake_failure_is_critical() {
    let health = evaluate_one(
        vec![inspection("VH-01", 3, &[("brakes", "grinding noise")])],
        Vec::new(),
    );

    assert_eq!(health.status, HealthStatus::Critical);
    assert_eq!(health.issues.len(), 1);
    assert_eq!(health.issues[0].severity, Severity::Critical);
    assert_eq!(health.issues[0].kind, IssueKind::RecentFailure);
}

#[test]
fn long_overdue_service_is_one_critical_issue() {
    let health = evaluate_one(Vec::new(), vec![maintenance("VH-01", 200, None)]);

    let service: Vec<_> = health
        .issues
        .iter()
        .filter(|issue| issue.kind == IssueKind::ServiceElapsed)
        .collect();
    assert_eq!(service.len(), 1);
    assert_eq!(service[0].severity, Severity::Critical);
    assert_eq!(health.status, HealthStatus::Critical);
}

#[test]
fn odometer_gap_needs_maintenance_history() {
    let mut latest = inspection("VH-01", 1, &[]);
    latest.odometer_km = Some(55_000);

    let health = evaluate_one(
        vec![latest.clone()],
        vec![maintenance("VH-01", 30, Some(49_000))],
    );
    let gap: Vec<_> = health
        .issues
        .iter()
        .filter(|issue| issue.kind == IssueKind::ServiceOdometer)
        .collect();
    assert_eq!(gap.len(), 1);
    assert_eq!(gap[0].severity, Severity::Warning);
    assert_eq!(gap[0].text, "service may be due — 6000 km since last service");

    let health = evaluate_one(vec![latest], Vec::new());
    assert!(health
        .issues
        .iter()
        .all(|issue| issue.kind != IssueKind::ServiceOdometer));
}

#[test]
fn critical_issues_lead_the_list() {
    let health = evaluate_one(
        vec![
            inspection("VH-01", 70, &[("wipers", "smearing"), ("tyres", "bald")]),
            inspection("VH-01", 80, &[("wipers", "smearing")]),
            inspection("VH-01", 90, &[]),
        ],
        vec![maintenance("VH-01", 120, None)],
    );

    // 70 days since last inspection against a 10-day cadence
    let severities: Vec<Severity> = health.issues.iter().map(|issue| issue.severity).collect();
    let kinds: Vec<IssueKind> = health.issues.iter().map(|issue| issue.kind).collect();
    assert_eq!(
        severities,
        vec![Severity::Critical, Severity::Warning, Severity::Warning]
    );
    assert_eq!(
        kinds,
        vec![
            IssueKind::InspectionTiming,
            IssueKind::RecurringFailure,
            IssueKind::ServiceElapsed,
        ]
    );
}

#[test]
fn custom_thresholds_change_verdicts() {
    let config = HealthConfig {
        service_warning_days: 30,
        service_critical_days: 60,
        ..HealthConfig::default()
    };
    let engine = FleetHealthEngine::new(config);

    let health = engine.evaluate_vehicle(
        &vehicle("VH-01"),
        &[],
        &[maintenance("VH-01", 45, None)],
        now(),
    );

    assert_eq!(health.status, HealthStatus::Warning);
    assert_eq!(engine.config().service_warning_days, 30);
}

#[test]
fn out_of_order_history_matches_sorted_history() {
    let sorted = vec![
        inspection("VH-01", 4, &[("mirrors", "cracked")]),
        inspection("VH-01", 18, &[("mirrors", "cracked")]),
        inspection("VH-01", 32, &[]),
    ];
    let mut shuffled = sorted.clone();
    shuffled.swap(0, 2);

    assert_eq!(
        evaluate_one(sorted, Vec::new()),
        evaluate_one(shuffled, Vec::new())
    );
}
