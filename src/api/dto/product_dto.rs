//! Product DTOs for create, update, get, and list operations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{NewProduct, Product, ProductFilter, ProductPatch, ProductStatus};
use crate::error::InventoryError;

/// Request body for `POST /products`.
///
/// Text fields default to empty so a missing field is reported by name
/// instead of as a decoding failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Category.
    #[serde(default)]
    pub category: String,
    /// Storage location.
    #[serde(default)]
    pub location: String,
    /// Initial status wire name; `AVAILABLE` when omitted.
    #[serde(default)]
    #[schema(example = "AVAILABLE")]
    pub status: Option<String>,
    /// Holder, required when `status` is `IN_EVENT`.
    #[serde(default)]
    pub picked_by: Option<String>,
    /// Serial number.
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Purchase value.
    #[serde(default)]
    pub value: Option<f64>,
    /// Purchase date (`YYYY-MM-DD`).
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = InventoryError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_status(req.status.as_deref())?,
            name: req.name,
            description: req.description,
            category: req.category,
            location: req.location,
            picked_by: req.picked_by,
            serial_number: req.serial_number,
            value: req.value,
            purchase_date: req.purchase_date,
        })
    }
}

/// Request body for `PATCH /products/{id}`. Omitted fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
    /// New location.
    #[serde(default)]
    pub location: Option<String>,
    /// New status wire name.
    #[serde(default)]
    #[schema(example = "IN_EVENT")]
    pub status: Option<String>,
    /// New holder.
    #[serde(default)]
    pub picked_by: Option<String>,
    /// New serial number; blank clears it.
    #[serde(default)]
    pub serial_number: Option<String>,
    /// New purchase value.
    #[serde(default)]
    pub value: Option<f64>,
    /// New purchase date.
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
}

impl TryFrom<UpdateProductRequest> for ProductPatch {
    type Error = InventoryError;

    fn try_from(req: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_status(req.status.as_deref())?,
            name: req.name,
            description: req.description,
            category: req.category,
            location: req.location,
            picked_by: req.picked_by,
            serial_number: req.serial_number,
            value: req.value,
            purchase_date: req.purchase_date,
        })
    }
}

/// A product as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Product identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Location.
    pub location: String,
    /// Lifecycle status.
    pub status: ProductStatus,
    /// Holder while `IN_EVENT`.
    pub picked_by: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Purchase value.
    pub value: Option<f64>,
    /// Purchase date.
    pub purchase_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: *p.id.as_uuid(),
            name: p.name,
            description: p.description,
            category: p.category,
            location: p.location,
            status: p.status,
            picked_by: p.picked_by,
            serial_number: p.serial_number,
            value: p.value,
            purchase_date: p.purchase_date,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Query parameters for `GET /products`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Exact status wire name.
    pub status: Option<String>,
    /// Location, matched case-insensitively.
    pub location: Option<String>,
    /// Substring of name, description, category, or serial number.
    pub search: Option<String>,
}

impl TryFrom<ProductListQuery> for ProductFilter {
    type Error = InventoryError;

    fn try_from(query: ProductListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_status(query.status.as_deref())?,
            location: query.location,
            search: query.search,
        })
    }
}

fn parse_status(raw: Option<&str>) -> Result<Option<ProductStatus>, InventoryError> {
    raw.map(str::parse::<ProductStatus>).transpose()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn create_request_reads_camel_case() {
        let body = r#"{
            "name": "Projector",
            "description": "4K",
            "category": "Video",
            "location": "Store",
            "status": "IN_EVENT",
            "pickedBy": "Alice",
            "serialNumber": "PX-1",
            "value": 1200.5,
            "purchaseDate": "2024-03-01"
        }"#;
        let Ok(req) = serde_json::from_str::<CreateProductRequest>(body) else {
            panic!("request should decode");
        };
        let Ok(input) = NewProduct::try_from(req) else {
            panic!("request should convert");
        };
        assert_eq!(input.status, Some(ProductStatus::InEvent));
        assert_eq!(input.picked_by.as_deref(), Some("Alice"));
        assert_eq!(input.serial_number.as_deref(), Some("PX-1"));
        assert!(input.purchase_date.is_some());
    }

    #[test]
    fn unknown_status_is_invalid_status() {
        let req = UpdateProductRequest {
            status: Some("LOST".to_string()),
            ..UpdateProductRequest::default()
        };
        let result = ProductPatch::try_from(req);
        assert!(matches!(result, Err(InventoryError::InvalidStatus(_))));
    }

    #[test]
    fn empty_update_is_empty_patch() {
        let Ok(req) = serde_json::from_str::<UpdateProductRequest>("{}") else {
            panic!("empty body should decode");
        };
        let Ok(patch) = ProductPatch::try_from(req) else {
            panic!("empty body should convert");
        };
        assert!(patch.is_empty());
    }

    #[test]
    fn response_uses_camel_case() {
        let Ok(product) = NewProduct {
            name: "Cable".to_string(),
            description: "XLR".to_string(),
            category: "Audio".to_string(),
            location: "Bin 4".to_string(),
            ..NewProduct::default()
        }
        .into_product(Utc::now()) else {
            panic!("fixture must be valid");
        };
        let Ok(json) = serde_json::to_value(ProductResponse::from(product)) else {
            panic!("serialization failed");
        };
        assert_eq!(json["status"], "AVAILABLE");
        assert!(json["pickedBy"].is_null());
        assert!(json.get("createdAt").is_some());
    }
}
