//! Change notifications emitted after committed mutations.
//!
//! Events tell consumers *which* product changed so they can refetch; they
//! deliberately carry no full record. They are published only after the
//! backing store has committed the change.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{CheckoutAction, ProductId, ProductStatus};

/// Domain event emitted after every committed mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum InventoryEvent {
    /// A product was created.
    ProductCreated {
        /// Product identifier.
        product_id: ProductId,
        /// Initial status.
        status: ProductStatus,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A product's fields were updated.
    ProductUpdated {
        /// Product identifier.
        product_id: ProductId,
        /// Status after the update.
        status: ProductStatus,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A product moved to a different status; a log entry was appended.
    StatusChanged {
        /// Product identifier.
        product_id: ProductId,
        /// Status before the update.
        previous_status: ProductStatus,
        /// Status after the update.
        new_status: ProductStatus,
        /// Holder after the update.
        picked_by: Option<String>,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A product and its history were deleted.
    ProductDeleted {
        /// Product identifier.
        product_id: ProductId,
        /// Number of log entries removed with it.
        removed_log_entries: u64,
        /// Deletion timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A checkout event was logged explicitly.
    CheckoutLogged {
        /// Product identifier.
        product_id: ProductId,
        /// Identifier of the new log entry.
        log_id: uuid::Uuid,
        /// Logged action.
        action: CheckoutAction,
        /// Write timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl InventoryEvent {
    /// Returns the product ID associated with this event.
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        match self {
            Self::ProductCreated { product_id, .. }
            | Self::ProductUpdated { product_id, .. }
            | Self::StatusChanged { product_id, .. }
            | Self::ProductDeleted { product_id, .. }
            | Self::CheckoutLogged { product_id, .. } => *product_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::ProductCreated { .. } => "product_created",
            Self::ProductUpdated { .. } => "product_updated",
            Self::StatusChanged { .. } => "status_changed",
            Self::ProductDeleted { .. } => "product_deleted",
            Self::CheckoutLogged { .. } => "checkout_logged",
        }
    }
}
