use crate::infra::parse_timestamp;
use chrono::{DateTime, Utc};
use clap::Args;
use fleet_health::config::AppConfig;
use fleet_health::error::AppError;
use fleet_health::history::{FleetSnapshot, MaintenanceCsvImporter};
use fleet_health::{telemetry, FleetHealthEngine, FleetHealthResult};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Fleet snapshot JSON with vehicles, inspections and maintenance records
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Optional maintenance bill CSV export merged into the snapshot
    #[arg(long)]
    pub(crate) maintenance_csv: Option<PathBuf>,
    /// Evaluation time (RFC 3339 or YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub(crate) pretty: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let engine = FleetHealthEngine::new(config.health);
    let result = evaluate_snapshot(&engine, &args)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{rendered}");
    Ok(())
}

fn evaluate_snapshot(
    engine: &FleetHealthEngine,
    args: &ReportArgs,
) -> Result<FleetHealthResult, AppError> {
    let mut snapshot = FleetSnapshot::from_path(&args.snapshot)?;
    if let Some(path) = &args.maintenance_csv {
        snapshot.extend_maintenance(MaintenanceCsvImporter::from_path(path)?);
    }

    let now = args.now.unwrap_or_else(Utc::now);
    Ok(snapshot.into_histories().evaluate(engine, now))
}
