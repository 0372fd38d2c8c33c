//! Persistence layer: the [`InventoryStore`] trait and its backends.
//!
//! [`postgres::PostgresStore`] is the durable backend, built on
//! `sqlx::PgPool` with one transaction per write. [`memory::MemoryStore`]
//! keeps everything behind a single `RwLock` and is used when persistence
//! is disabled and in tests.
//!
//! Backends own atomicity: an update and its checkout log entry, or a
//! delete and its cascade, are never observable half-applied.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{CheckoutHistoryEntry, CheckoutLogEntry, Product, ProductId, ProductPatch, UpdatePlan};
use crate::error::InventoryError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Storage operations required by the inventory service.
#[async_trait]
pub trait InventoryStore: Send + Sync + fmt::Debug {
    /// Short backend name for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;

    /// Returns every product, newest `created_at` first.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Storage`] on backend failure.
    async fn list_products(&self) -> Result<Vec<Product>, InventoryError>;

    /// Returns one product.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::ProductNotFound`] if it does not exist.
    async fn get_product(&self, id: ProductId) -> Result<Product, InventoryError>;

    /// Persists a freshly validated product.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Storage`] on backend failure.
    async fn insert_product(&self, product: &Product) -> Result<(), InventoryError>;

    /// Loads the product, merges `patch` via [`Product::apply_patch`], and
    /// stores the result together with the status-change entry, if any, as
    /// one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::ProductNotFound`] if the product does not
    /// exist and [`InventoryError::Validation`] if the merged record is
    /// invalid. Nothing is written in either case.
    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
        actor: &str,
    ) -> Result<UpdatePlan, InventoryError>;

    /// Deletes the product's log entries, then the product, atomically.
    ///
    /// Returns the number of log entries removed.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::ProductNotFound`] if it does not exist.
    async fn delete_product(&self, id: ProductId) -> Result<u64, InventoryError>;

    /// Appends a log entry for an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::ProductNotFound`] if the product does not
    /// exist.
    async fn append_log(&self, entry: &CheckoutLogEntry) -> Result<(), InventoryError>;

    /// Returns the product's log entries, newest first. Empty when there are
    /// none or the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Storage`] on backend failure.
    async fn history(&self, id: ProductId) -> Result<Vec<CheckoutHistoryEntry>, InventoryError>;
}
