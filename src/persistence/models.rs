//! Database row types for the `products` and `checkout_logs` tables.
//!
//! Statuses and actions are stored as their wire strings and parsed on the
//! way out, so a row that fails to parse surfaces as a storage error.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{
    CheckoutAction, CheckoutHistoryEntry, CheckoutLogEntry, Product, ProductId, ProductStatus,
};
use crate::error::InventoryError;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Location.
    pub location: String,
    /// Status wire string.
    pub status: String,
    /// Holder.
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

/// A row from `checkout_logs`, joined with the owning product's name.
#[derive(Debug, Clone, FromRow)]
pub struct CheckoutLogRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning product.
    pub product_id: Uuid,
    /// Action wire string.
    pub action: String,
    /// Previous status wire string.
    pub previous_status: Option<String>,
    /// New status wire string.
    pub new_status: Option<String>,
    /// Holder.
    pub picked_by: Option<String>,
    /// Write time.
    pub timestamp: DateTime<Utc>,
    /// Actor.
    pub updated_by: String,
    /// Name of the owning product.
    pub product_name: Option<String>,
}

fn parse_status(raw: &str) -> Result<ProductStatus, InventoryError> {
    raw.parse::<ProductStatus>()
        .map_err(|_| InventoryError::Storage(format!("unknown status in database: {raw}")))
}

fn parse_optional_status(raw: Option<&str>) -> Result<Option<ProductStatus>, InventoryError> {
    raw.map(parse_status).transpose()
}

impl TryFrom<ProductRow> for Product {
    type Error = InventoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::from_uuid(row.id),
            status: parse_status(&row.status)?,
            name: row.name,
            description: row.description,
            category: row.category,
            location: row.location,
            picked_by: row.picked_by,
            serial_number: row.serial_number,
            value: row.value,
            purchase_date: row.purchase_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<CheckoutLogRow> for CheckoutHistoryEntry {
    type Error = InventoryError;

    fn try_from(row: CheckoutLogRow) -> Result<Self, Self::Error> {
        let action = row
            .action
            .parse::<CheckoutAction>()
            .map_err(|_| InventoryError::Storage(format!("unknown action in database: {}", row.action)))?;
        Ok(Self {
            entry: CheckoutLogEntry {
                id: row.id,
                product_id: ProductId::from_uuid(row.product_id),
                action,
                previous_status: parse_optional_status(row.previous_status.as_deref())?,
                new_status: parse_optional_status(row.new_status.as_deref())?,
                picked_by: row.picked_by,
                timestamp: row.timestamp,
                updated_by: row.updated_by,
            },
            product_name: row.product_name,
        })
    }
}
