//! Checkout log: immutable audit records of status transitions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::product::PICKED_BY_REQUIRED;
use super::{ProductId, ProductStatus};
use crate::error::InventoryError;

/// Kind of transition recorded by a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutAction {
    /// The product was handed to someone for an event.
    Checkout,
    /// The product came back from an event.
    Return,
    /// Any other status change.
    StatusChange,
}

impl CheckoutAction {
    /// Returns the wire string for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checkout => "CHECKOUT",
            Self::Return => "RETURN",
            Self::StatusChange => "STATUS_CHANGE",
        }
    }

    /// Infers the action for a transition between two statuses.
    #[must_use]
    pub fn infer(previous: Option<ProductStatus>, new: ProductStatus) -> Self {
        match (previous, new) {
            (_, ProductStatus::InEvent) => Self::Checkout,
            (Some(ProductStatus::InEvent), _) => Self::Return,
            _ => Self::StatusChange,
        }
    }
}

impl fmt::Display for CheckoutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckoutAction {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHECKOUT" => Ok(Self::Checkout),
            "RETURN" => Ok(Self::Return),
            "STATUS_CHANGE" => Ok(Self::StatusChange),
            other => Err(InventoryError::validation(format!(
                "unknown checkout action: {other}"
            ))),
        }
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLogEntry {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Product the entry belongs to.
    pub product_id: ProductId,
    /// Kind of transition.
    pub action: CheckoutAction,
    /// Status before the transition.
    pub previous_status: Option<ProductStatus>,
    /// Status after the transition.
    pub new_status: Option<ProductStatus>,
    /// Holder at the time of the transition.
    pub picked_by: Option<String>,
    /// Write time.
    pub timestamp: DateTime<Utc>,
    /// Actor that caused the transition.
    pub updated_by: String,
}

impl CheckoutLogEntry {
    /// Builds the `STATUS_CHANGE` entry written alongside a product update.
    #[must_use]
    pub fn status_change(
        product_id: ProductId,
        previous: ProductStatus,
        new: ProductStatus,
        picked_by: Option<String>,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            product_id,
            action: CheckoutAction::StatusChange,
            previous_status: Some(previous),
            new_status: Some(new),
            picked_by,
            timestamp: now,
            updated_by: actor.to_string(),
        }
    }
}

/// Input for an explicitly logged checkout event.
#[derive(Debug, Clone)]
pub struct NewCheckoutLog {
    /// Product the entry belongs to.
    pub product_id: ProductId,
    /// Status the entry reports.
    pub status: ProductStatus,
    /// Holder; required when `status` is `IN_EVENT`.
    pub picked_by: Option<String>,
    /// Explicit action; inferred from the statuses when omitted.
    pub action: Option<CheckoutAction>,
    /// Status before the event.
    pub previous_status: Option<ProductStatus>,
    /// Status after the event; defaults to `status`.
    pub new_status: Option<ProductStatus>,
    /// Actor; defaults to the service actor.
    pub updated_by: Option<String>,
}

impl NewCheckoutLog {
    /// Validates the input and builds the entry stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] when `status` is `IN_EVENT`
    /// and `picked_by` is missing or blank.
    pub fn into_entry(
        self,
        default_actor: &str,
        now: DateTime<Utc>,
    ) -> Result<CheckoutLogEntry, InventoryError> {
        let picked_by = self
            .picked_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if self.status.requires_holder() && picked_by.is_none() {
            return Err(InventoryError::validation(PICKED_BY_REQUIRED));
        }

        let new_status = self.new_status.unwrap_or(self.status);
        let action = self
            .action
            .unwrap_or_else(|| CheckoutAction::infer(self.previous_status, new_status));
        let updated_by = self
            .updated_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(default_actor)
            .to_string();

        Ok(CheckoutLogEntry {
            id: uuid::Uuid::new_v4(),
            product_id: self.product_id,
            action,
            previous_status: self.previous_status,
            new_status: Some(new_status),
            picked_by,
            timestamp: now,
            updated_by,
        })
    }
}

/// A log entry annotated with its product's name for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutHistoryEntry {
    /// The stored entry.
    #[serde(flatten)]
    pub entry: CheckoutLogEntry,
    /// Name of the owning product at read time.
    pub product_name: Option<String>,
}
