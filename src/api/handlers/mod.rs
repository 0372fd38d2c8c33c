//! REST endpoint handlers organized by resource.

pub mod checkout;
pub mod product;
pub mod stats;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(product::routes())
        .merge(checkout::routes())
        .merge(stats::routes())
        .merge(system::registry_routes())
}
