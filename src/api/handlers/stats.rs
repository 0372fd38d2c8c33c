//! Dashboard statistics handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    GroupsQuery, GroupsResponse, ProductResponse, RecentQuery, SUMMARY_RECENT, SUMMARY_TOP,
    SummaryResponse,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, InventoryError};

/// `GET /stats/summary` — Dashboard summary.
///
/// # Errors
///
/// Returns [`InventoryError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/stats/summary",
    tag = "Statistics",
    summary = "Inventory summary",
    description = "Totals, per-status distribution, values, top categories and locations, and recent activity, recomputed from the current product set.",
    responses(
        (status = 200, description = "Summary", body = SummaryResponse),
    )
)]
pub async fn summary(State(state): State<AppState>) -> Result<impl IntoResponse, InventoryError> {
    let summary = state
        .inventory_service
        .summary(SUMMARY_TOP, SUMMARY_RECENT)
        .await?;
    Ok(Json(SummaryResponse::from(summary)))
}

/// `GET /stats/groups` — Product counts grouped by a text field.
///
/// # Errors
///
/// Returns [`InventoryError::Validation`] on an unknown field.
#[utoipa::path(
    get,
    path = "/api/v1/stats/groups",
    tag = "Statistics",
    summary = "Group counts",
    params(GroupsQuery),
    responses(
        (status = 200, description = "Groups, largest first", body = GroupsResponse),
        (status = 400, description = "Unknown field", body = ErrorResponse),
    )
)]
pub async fn groups(
    State(state): State<AppState>,
    query: Result<Query<GroupsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let Query(query) = query?;
    let groups = state
        .inventory_service
        .groups(query.field, query.limit)
        .await?;
    Ok(Json(GroupsResponse {
        field: query.field,
        groups,
    }))
}

/// `GET /stats/recent` — Most recently updated products.
///
/// # Errors
///
/// Returns [`InventoryError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/stats/recent",
    tag = "Statistics",
    summary = "Recent activity",
    params(RecentQuery),
    responses(
        (status = 200, description = "Products by last update, newest first", body = Vec<ProductResponse>),
    )
)]
pub async fn recent(
    State(state): State<AppState>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let Query(query) = query?;
    let products = state.inventory_service.recent_activity(query.limit).await?;
    let data: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
    Ok(Json(data))
}

/// Statistics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats/summary", get(summary))
        .route("/stats/groups", get(groups))
        .route("/stats/recent", get(recent))
}
