//! Checkout log DTOs: explicit log writes and history reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CheckoutAction, CheckoutHistoryEntry, CheckoutLogEntry, NewCheckoutLog, ProductId,
    ProductStatus,
};
use crate::error::InventoryError;

/// Request body for `POST /checkout/logs`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLogRequest {
    /// Product the entry belongs to.
    pub product_id: uuid::Uuid,
    /// Reported status wire name.
    #[schema(example = "IN_EVENT")]
    pub status: String,
    /// Holder; required when `status` is `IN_EVENT`.
    #[serde(default)]
    pub picked_by: Option<String>,
    /// `CHECKOUT`, `RETURN` or `STATUS_CHANGE`; inferred when omitted.
    #[serde(default)]
    pub action: Option<String>,
    /// Status before the event.
    #[serde(default)]
    pub previous_status: Option<String>,
    /// Status after the event; defaults to `status`.
    #[serde(default)]
    pub new_status: Option<String>,
    /// Actor; defaults to the configured actor.
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl TryFrom<CheckoutLogRequest> for NewCheckoutLog {
    type Error = InventoryError;

    fn try_from(req: CheckoutLogRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: ProductId::from_uuid(req.product_id),
            status: req.status.parse::<ProductStatus>()?,
            picked_by: req.picked_by,
            action: req
                .action
                .as_deref()
                .map(str::parse::<CheckoutAction>)
                .transpose()?,
            previous_status: req
                .previous_status
                .as_deref()
                .map(str::parse::<ProductStatus>)
                .transpose()?,
            new_status: req
                .new_status
                .as_deref()
                .map(str::parse::<ProductStatus>)
                .transpose()?,
            updated_by: req.updated_by,
        })
    }
}

/// A stored checkout log entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLogResponse {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Owning product.
    pub product_id: uuid::Uuid,
    /// Kind of transition.
    pub action: CheckoutAction,
    /// Status before the transition.
    pub previous_status: Option<ProductStatus>,
    /// Status after the transition.
    pub new_status: Option<ProductStatus>,
    /// Holder at the time.
    pub picked_by: Option<String>,
    /// Write time.
    pub timestamp: DateTime<Utc>,
    /// Actor.
    pub updated_by: String,
}

impl From<CheckoutLogEntry> for CheckoutLogResponse {
    fn from(entry: CheckoutLogEntry) -> Self {
        Self {
            id: entry.id,
            product_id: *entry.product_id.as_uuid(),
            action: entry.action,
            previous_status: entry.previous_status,
            new_status: entry.new_status,
            picked_by: entry.picked_by,
            timestamp: entry.timestamp,
            updated_by: entry.updated_by,
        }
    }
}

/// One history row: a log entry plus its product's name.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    /// The stored entry.
    #[serde(flatten)]
    pub entry: CheckoutLogResponse,
    /// Name of the owning product.
    pub product_name: Option<String>,
}

impl From<CheckoutHistoryEntry> for HistoryEntryResponse {
    fn from(row: CheckoutHistoryEntry) -> Self {
        Self {
            entry: row.entry.into(),
            product_name: row.product_name,
        }
    }
}
