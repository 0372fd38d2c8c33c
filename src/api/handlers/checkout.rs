//! Explicit checkout log handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{CheckoutLogRequest, CheckoutLogResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, InventoryError};

/// `POST /checkout/logs` — Append a checkout log entry.
///
/// # Errors
///
/// Returns [`InventoryError::Validation`] when `status` is `IN_EVENT`
/// without a holder, and [`InventoryError::ProductNotFound`] for an
/// unknown product.
#[utoipa::path(
    post,
    path = "/api/v1/checkout/logs",
    tag = "Checkout",
    summary = "Log a checkout event",
    description = "Appends an audit entry. The action is inferred from the statuses when omitted and the actor defaults to the configured one.",
    request_body = CheckoutLogRequest,
    responses(
        (status = 201, description = "Entry logged", body = CheckoutLogResponse),
        (status = 400, description = "Invalid entry", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn log_checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutLogRequest>, JsonRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let Json(req) = payload?;
    let entry = state.inventory_service.log_checkout(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(CheckoutLogResponse::from(entry))))
}

/// Checkout routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/checkout/logs", post(log_checkout))
}
