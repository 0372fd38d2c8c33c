//! Inventory service: validates writes, delegates to the store, and emits
//! change events.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::stats::{self, GroupCount, GroupField, InventorySummary, StatusShare};
use crate::domain::{
    CheckoutHistoryEntry, CheckoutLogEntry, EventBus, InventoryEvent, NewCheckoutLog, NewProduct,
    Product, ProductFilter, ProductId, ProductPatch,
};
use crate::error::InventoryError;
use crate::persistence::InventoryStore;

/// Orchestration layer for all inventory operations.
///
/// Stateless coordinator: owns the [`InventoryStore`] for state and the
/// [`EventBus`] for change notification. Every mutation follows the
/// pattern: validate → commit in the store → emit events → return result.
/// Events are never emitted for a write that did not commit.
#[derive(Debug, Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    event_bus: EventBus,
    actor: String,
}

impl InventoryService {
    /// Creates a new `InventoryService`. Writes are attributed to `actor`.
    #[must_use]
    pub fn new(store: Arc<dyn InventoryStore>, event_bus: EventBus, actor: impl Into<String>) -> Self {
        Self {
            store,
            event_bus,
            actor: actor.into(),
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn InventoryStore> {
        &self.store
    }

    /// Returns the actor that writes are attributed to.
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Returns every product matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Storage`] on backend failure.
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, InventoryError> {
        let products = self.store.list_products().await?;
        Ok(filter.apply(products))
    }

    /// Returns one product.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::ProductNotFound`] if it does not exist.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, InventoryError> {
        self.store.get_product(id).await
    }

    /// Validates and stores a new product. No log entry is written.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] on invalid input.
    pub async fn create_product(&self, input: NewProduct) -> Result<Product, InventoryError> {
        let product = input.into_product(Utc::now()).inspect_err(|e| {
            tracing::debug!(error = %e, "product creation rejected");
        })?;
        self.store.insert_product(&product).await?;

        let _ = self.event_bus.publish(InventoryEvent::ProductCreated {
            product_id: product.id,
            status: product.status,
            timestamp: product.created_at,
        });

        tracing::info!(product_id = %product.id, status = %product.status, "product created");
        Ok(product)
    }

    /// Merges `patch` onto the stored product.
    ///
    /// When the status changes, one `STATUS_CHANGE` entry is committed in
    /// the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::ProductNotFound`] or
    /// [`InventoryError::Validation`]; in both cases nothing is written.
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, InventoryError> {
        let plan = self
            .store
            .update_product(id, &patch, &self.actor)
            .await
            .inspect_err(|e| {
                if e.is_client_error() {
                    tracing::debug!(product_id = %id, error = %e, "product update rejected");
                }
            })?;
        let product = plan.product;

        let _ = self.event_bus.publish(InventoryEvent::ProductUpdated {
            product_id: id,
            status: product.status,
            timestamp: product.updated_at,
        });

        if let Some(entry) = plan.transition {
            let _ = self.event_bus.publish(InventoryEvent::StatusChanged {
                product_id: id,
                previous_status: plan.previous_status,
                new_status: product.status,
                picked_by: entry.picked_by,
                timestamp: entry.timestamp,
            });
            tracing::info!(
                product_id = %id,
                from = %plan.previous_status,
                to = %product.status,
                "product status changed"
            );
        } else {
            tracing::info!(product_id = %id, "product updated");
        }

        Ok(product)
    }

    /// Deletes a product together with its history.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::ProductNotFound`] if it does not exist.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), InventoryError> {
        let removed_log_entries = self.store.delete_product(id).await?;

        let _ = self.event_bus.publish(InventoryEvent::ProductDeleted {
            product_id: id,
            removed_log_entries,
            timestamp: Utc::now(),
        });

        tracing::info!(product_id = %id, removed_log_entries, "product deleted");
        Ok(())
    }

    /// Appends an explicit checkout log entry.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] when `IN_EVENT` lacks a holder
    /// and [`InventoryError::ProductNotFound`] for an unknown product.
    pub async fn log_checkout(&self, input: NewCheckoutLog) -> Result<CheckoutLogEntry, InventoryError> {
        let entry = input.into_entry(&self.actor, Utc::now())?;
        self.store.append_log(&entry).await?;

        let _ = self.event_bus.publish(InventoryEvent::CheckoutLogged {
            product_id: entry.product_id,
            log_id: entry.id,
            action: entry.action,
            timestamp: entry.timestamp,
        });

        tracing::info!(product_id = %entry.product_id, action = %entry.action, "checkout logged");
        Ok(entry)
    }

    /// Returns the product's history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Storage`] on backend failure.
    pub async fn history(&self, id: ProductId) -> Result<Vec<CheckoutHistoryEntry>, InventoryError> {
        self.store.history(id).await
    }

    /// Computes the dashboard summary over the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Storage`] on backend failure.
    pub async fn summary(&self, top: usize, recent: usize) -> Result<InventorySummary, InventoryError> {
        let products = self.store.list_products().await?;
        Ok(stats::summarize(&products, top, recent))
    }

    /// Per-status counts and percentages over the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Storage`] on backend failure.
    pub async fn status_distribution(&self) -> Result<Vec<StatusShare>, InventoryError> {
        let products = self.store.list_products().await?;
        Ok(stats::status_distribution(&products))
    }

    /// Largest groups by `field`, or every group when `limit` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Storage`] on backend failure.
    pub async fn groups(
        &self,
        field: GroupField,
        limit: Option<usize>,
    ) -> Result<Vec<GroupCount>, InventoryError> {
        let products = self.store.list_products().await?;
        let groups = stats::group_counts(&products, field);
        Ok(match limit {
            Some(n) => stats::top_n(groups, n),
            None => groups,
        })
    }

    /// The `limit` most recently updated products.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Storage`] on backend failure.
    pub async fn recent_activity(&self, limit: usize) -> Result<Vec<Product>, InventoryError> {
        let products = self.store.list_products().await?;
        Ok(stats::recent_activity(&products, limit)
            .into_iter()
            .cloned()
            .collect())
    }
}
