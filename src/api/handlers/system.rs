//! System endpoints: health check and the status registry.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::StatusInfo;
use crate::domain::product_status;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    storage: &'static str,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, storage backend, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: state.inventory_service.store().backend_name(),
        }),
    )
}

/// `GET /statuses` — The six lifecycle statuses with display metadata.
#[utoipa::path(
    get,
    path = "/api/v1/statuses",
    tag = "System",
    summary = "List lifecycle statuses",
    description = "Returns every status in display order with its label, icon, color class, and description.",
    responses(
        (status = 200, description = "Status registry", body = Vec<StatusInfo>),
    )
)]
pub async fn statuses_handler() -> impl IntoResponse {
    let statuses: Vec<&'static StatusInfo> = product_status::registry().collect();
    (StatusCode::OK, Json(statuses))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

/// Registry routes mounted under /api/v1.
pub fn registry_routes() -> Router<AppState> {
    Router::new().route("/statuses", get(statuses_handler))
}
