//! Product aggregate: creation, partial updates, and the holder invariant.
//!
//! Every write path funnels through [`NewProduct::into_product`] or
//! [`Product::apply_patch`], so the rule "a product in `IN_EVENT` names a
//! non-blank holder" is checked against the final record, never the raw
//! input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::checkout_log::CheckoutLogEntry;
use super::{ProductId, ProductStatus};
use crate::error::InventoryError;

/// Message used whenever the holder invariant is violated.
pub const PICKED_BY_REQUIRED: &str = "pickedBy is required when status is IN_EVENT";

/// A tracked physical item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (immutable after creation).
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Category used for grouping.
    pub category: String,
    /// Storage location used for grouping.
    pub location: String,
    /// Current lifecycle status.
    pub status: ProductStatus,
    /// Who holds the product. Only set while `status` is `IN_EVENT`.
    pub picked_by: Option<String>,
    /// Manufacturer serial number.
    pub serial_number: Option<String>,
    /// Purchase value. Non-negative when present.
    pub value: Option<f64>,
    /// Date of purchase.
    pub purchase_date: Option<NaiveDate>,
    /// Creation timestamp (immutable after creation).
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a product.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Location.
    pub location: String,
    /// Initial status; `AVAILABLE` when omitted.
    pub status: Option<ProductStatus>,
    /// Holder, required for `IN_EVENT`.
    pub picked_by: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Purchase value.
    pub value: Option<f64>,
    /// Date of purchase.
    pub purchase_date: Option<NaiveDate>,
}

/// Partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New status.
    pub status: Option<ProductStatus>,
    /// New holder. A blank string is kept as blank and fails validation
    /// when the merged status is `IN_EVENT`.
    pub picked_by: Option<String>,
    /// New serial number. Blank clears it.
    pub serial_number: Option<String>,
    /// New purchase value.
    pub value: Option<f64>,
    /// New purchase date.
    pub purchase_date: Option<NaiveDate>,
}

impl ProductPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.location.is_none()
            && self.status.is_none()
            && self.picked_by.is_none()
            && self.serial_number.is_none()
            && self.value.is_none()
            && self.purchase_date.is_none()
    }
}

/// Result of merging a [`ProductPatch`] onto a stored product.
///
/// Both halves must be persisted in the same transaction.
#[derive(Debug, Clone)]
pub struct UpdatePlan {
    /// The record to store.
    pub product: Product,
    /// Log entry to append, present iff the status changed.
    pub transition: Option<CheckoutLogEntry>,
    /// Status before the update.
    pub previous_status: ProductStatus,
}

impl NewProduct {
    /// Validates the input and builds a fresh product stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] if a required field is blank,
    /// the value is negative or not finite, or the status is `IN_EVENT`
    /// without a holder.
    pub fn into_product(self, now: DateTime<Utc>) -> Result<Product, InventoryError> {
        let status = self.status.unwrap_or(ProductStatus::Available);
        let product = Product {
            id: ProductId::new(),
            name: required("name", &self.name)?,
            description: required("description", &self.description)?,
            category: required("category", &self.category)?,
            location: required("location", &self.location)?,
            status,
            picked_by: holder_for(status, self.picked_by.as_deref())?,
            serial_number: optional(self.serial_number.as_deref()),
            value: checked_value(self.value)?,
            purchase_date: self.purchase_date,
            created_at: now,
            updated_at: now,
        };
        Ok(product)
    }
}

impl Product {
    /// Merges `patch` onto this product and validates the merged record.
    ///
    /// When the merged status differs from the stored one, the plan carries
    /// a `STATUS_CHANGE` entry attributed to `actor` and stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] if the merged record breaks any
    /// field rule or the holder invariant. `self` is left untouched.
    pub fn apply_patch(
        &self,
        patch: &ProductPatch,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<UpdatePlan, InventoryError> {
        let status = patch.status.unwrap_or(self.status);
        let merged_holder = patch.picked_by.as_deref().or(self.picked_by.as_deref());

        let product = Self {
            id: self.id,
            name: merge_required("name", patch.name.as_deref(), &self.name)?,
            description: merge_required(
                "description",
                patch.description.as_deref(),
                &self.description,
            )?,
            category: merge_required("category", patch.category.as_deref(), &self.category)?,
            location: merge_required("location", patch.location.as_deref(), &self.location)?,
            status,
            picked_by: holder_for(status, merged_holder)?,
            serial_number: match patch.serial_number.as_deref() {
                Some(serial) => optional(Some(serial)),
                None => self.serial_number.clone(),
            },
            value: checked_value(patch.value.or(self.value))?,
            purchase_date: patch.purchase_date.or(self.purchase_date),
            created_at: self.created_at,
            updated_at: now,
        };

        let transition = (status != self.status).then(|| {
            CheckoutLogEntry::status_change(
                self.id,
                self.status,
                status,
                product.picked_by.clone(),
                actor,
                now,
            )
        });

        Ok(UpdatePlan {
            product,
            transition,
            previous_status: self.status,
        })
    }

    /// Returns `true` if the product satisfies the holder invariant.
    #[must_use]
    pub fn holder_invariant_holds(&self) -> bool {
        !self.status.requires_holder() || self.picked_by.as_deref().is_some_and(is_present)
    }
}

fn is_present(s: &str) -> bool {
    !s.trim().is_empty()
}

fn required(field: &str, value: &str) -> Result<String, InventoryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn merge_required(
    field: &str,
    incoming: Option<&str>,
    stored: &str,
) -> Result<String, InventoryError> {
    match incoming {
        Some(value) => required(field, value),
        None => Ok(stored.to_string()),
    }
}

fn optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Holder to store for `status`: required and trimmed for `IN_EVENT`,
/// cleared for every other status.
fn holder_for(status: ProductStatus, holder: Option<&str>) -> Result<Option<String>, InventoryError> {
    if !status.requires_holder() {
        return Ok(None);
    }
    match optional(holder) {
        Some(holder) => Ok(Some(holder)),
        None => Err(InventoryError::validation(PICKED_BY_REQUIRED)),
    }
}

fn checked_value(value: Option<f64>) -> Result<Option<f64>, InventoryError> {
    match value {
        Some(v) if !v.is_finite() => Err(InventoryError::validation("value must be a number")),
        Some(v) if v < 0.0 => Err(InventoryError::validation("value must not be negative")),
        other => Ok(other),
    }
}
