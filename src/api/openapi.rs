//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{
    CheckoutLogRequest, CheckoutLogResponse, CreateProductRequest, DeleteResponse,
    GroupsResponse, HistoryEntryResponse, ProductResponse, SummaryResponse, UpdateProductRequest,
};
use super::handlers::{checkout, product, stats, system};
use crate::domain::stats::{GroupCount, GroupField, GroupValue, StatusShare};
use crate::domain::{CheckoutAction, ProductStatus, StatusInfo};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI document, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "inventory-gateway",
        description = "Product lifecycle tracking with a checkout audit log."
    ),
    paths(
        system::health_handler,
        system::statuses_handler,
        product::create_product,
        product::list_products,
        product::get_product,
        product::update_product,
        product::delete_product,
        product::product_history,
        checkout::log_checkout,
        stats::summary,
        stats::groups,
        stats::recent,
    ),
    components(schemas(
        CreateProductRequest,
        UpdateProductRequest,
        ProductResponse,
        DeleteResponse,
        CheckoutLogRequest,
        CheckoutLogResponse,
        HistoryEntryResponse,
        SummaryResponse,
        GroupsResponse,
        GroupCount,
        GroupField,
        GroupValue,
        StatusShare,
        StatusInfo,
        ProductStatus,
        CheckoutAction,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Products", description = "Product records"),
        (name = "Checkout", description = "Checkout audit log"),
        (name = "Statistics", description = "Derived dashboard statistics"),
        (name = "System", description = "Health and status registry"),
    )
)]
pub struct ApiDoc;
