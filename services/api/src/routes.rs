use crate::infra::{deserialize_optional_timestamp, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use fleet_health::error::AppError;
use fleet_health::history::{FleetSnapshot, MaintenanceCsvImporter};
use fleet_health::{FleetHealthEngine, FleetHealthResult};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct FleetHealthRequest {
    #[serde(default)]
    pub(crate) snapshot: FleetSnapshot,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub(crate) now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) maintenance_csv: Option<String>,
}

/// Evaluation routes; operational endpoints that need [`AppState`] are added by the server.
pub(crate) fn fleet_router(engine: Arc<FleetHealthEngine>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/v1/fleet/health", post(fleet_health_endpoint))
        .layer(Extension(engine))
}

pub(crate) fn with_operational_routes(router: Router) -> Router {
    router
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn fleet_health_endpoint(
    Extension(engine): Extension<Arc<FleetHealthEngine>>,
    Json(payload): Json<FleetHealthRequest>,
) -> Result<Json<FleetHealthResult>, AppError> {
    let FleetHealthRequest {
        mut snapshot,
        now,
        maintenance_csv,
    } = payload;

    if let Some(csv) = maintenance_csv {
        let reader = Cursor::new(csv.into_bytes());
        snapshot.extend_maintenance(MaintenanceCsvImporter::from_reader(reader)?);
    }

    let now = now.unwrap_or_else(Utc::now);
    Ok(Json(snapshot.into_histories().evaluate(&engine, now)))
}
