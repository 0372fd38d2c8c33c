//! Product CRUD handlers: create, list, get, update, delete, history.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    CreateProductRequest, DeleteResponse, HistoryEntryResponse, ProductListQuery,
    ProductResponse, UpdateProductRequest,
};
use crate::app_state::AppState;
use crate::domain::{ProductFilter, ProductId};
use crate::error::{ErrorResponse, InventoryError};

/// `POST /products` — Create a product.
///
/// # Errors
///
/// Returns [`InventoryError`] on an undecodable body or invalid fields.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Products",
    summary = "Create a product",
    description = "Creates a product. Status defaults to AVAILABLE; IN_EVENT requires a non-blank pickedBy. No checkout log entry is written.",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product", body = ErrorResponse),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let Json(req) = payload?;
    let product = state.inventory_service.create_product(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// `GET /products` — List products, newest first.
///
/// # Errors
///
/// Returns [`InventoryError`] on an unknown status filter or storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    summary = "List products",
    description = "Returns every product ordered by creation time, newest first, optionally narrowed by status, location, or a search term.",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Product list", body = Vec<ProductResponse>),
        (status = 400, description = "Unknown status", body = ErrorResponse),
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let Query(query) = query?;
    let filter = ProductFilter::try_from(query)?;
    let products = state.inventory_service.list_products(&filter).await?;
    let data: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
    Ok(Json(data))
}

/// `GET /products/{id}` — Get one product.
///
/// # Errors
///
/// Returns [`InventoryError::ProductNotFound`] if it does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    summary = "Get a product",
    params(
        ("id" = uuid::Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let Path(id) = id?;
    let product = state
        .inventory_service
        .get_product(ProductId::from_uuid(id))
        .await?;
    Ok(Json(ProductResponse::from(product)))
}

/// `PATCH /products/{id}` — Partially update a product.
///
/// # Errors
///
/// Returns [`InventoryError`] if the product is missing or the merged record
/// is invalid; nothing is written in either case.
#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    tag = "Products",
    summary = "Update a product",
    description = "Merges the supplied fields onto the stored product. A status change appends exactly one STATUS_CHANGE log entry in the same transaction.",
    params(
        ("id" = uuid::Uuid, Path, description = "Product UUID"),
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Invalid update", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let product = state
        .inventory_service
        .update_product(ProductId::from_uuid(id), req.try_into()?)
        .await?;
    Ok(Json(ProductResponse::from(product)))
}

/// `DELETE /products/{id}` — Remove a product and its history.
///
/// # Errors
///
/// Returns [`InventoryError::ProductNotFound`] if it does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Products",
    summary = "Delete a product",
    description = "Removes the product and every checkout log entry that references it.",
    params(
        ("id" = uuid::Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let Path(id) = id?;
    state
        .inventory_service
        .delete_product(ProductId::from_uuid(id))
        .await?;
    Ok(Json(DeleteResponse::ok()))
}

/// `GET /products/{id}/history` — Checkout history, newest first.
///
/// # Errors
///
/// Returns [`InventoryError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/history",
    tag = "Checkout",
    summary = "Product checkout history",
    description = "Returns every log entry for the product, newest first, each annotated with the product name. Unknown products have an empty history.",
    params(
        ("id" = uuid::Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "History entries", body = Vec<HistoryEntryResponse>),
    )
)]
pub async fn product_history(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let Path(id) = id?;
    let entries = state
        .inventory_service
        .history(ProductId::from_uuid(id))
        .await?;
    let data: Vec<HistoryEntryResponse> = entries.into_iter().map(Into::into).collect();
    Ok(Json(data))
}

/// Product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route("/products/{id}/history", get(product_history))
}
