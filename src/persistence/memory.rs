//! In-memory store guarded by a single [`tokio::sync::RwLock`].
//!
//! Every write takes the one write lock for its whole duration, which makes
//! update-plus-log and delete-plus-cascade atomic with respect to readers.

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::InventoryStore;
use crate::domain::{
    CheckoutHistoryEntry, CheckoutLogEntry, Product, ProductId, ProductPatch, UpdatePlan,
};
use crate::error::InventoryError;

#[derive(Debug, Default)]
struct MemoryState {
    /// Products in insertion order.
    products: IndexMap<ProductId, Product>,
    /// Log entries in append order.
    logs: Vec<CheckoutLogEntry>,
}

/// Volatile [`InventoryStore`] backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of log entries across all products.
    pub async fn log_len(&self) -> usize {
        self.state.read().await.logs.len()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_products(&self) -> Result<Vec<Product>, InventoryError> {
        let state = self.state.read().await;
        let mut products: Vec<Product> = state.products.values().rev().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, InventoryError> {
        let state = self.state.read().await;
        state
            .products
            .get(&id)
            .cloned()
            .ok_or(InventoryError::ProductNotFound(*id.as_uuid()))
    }

    async fn insert_product(&self, product: &Product) -> Result<(), InventoryError> {
        let mut state = self.state.write().await;
        if state.products.contains_key(&product.id) {
            return Err(InventoryError::Storage(format!(
                "product {} already exists",
                product.id
            )));
        }
        state.products.insert(product.id, product.clone());
        Ok(())
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
        actor: &str,
    ) -> Result<UpdatePlan, InventoryError> {
        let mut state = self.state.write().await;
        let existing = state
            .products
            .get(&id)
            .ok_or(InventoryError::ProductNotFound(*id.as_uuid()))?;

        let plan = existing.apply_patch(patch, actor, Utc::now())?;

        state.products.insert(id, plan.product.clone());
        if let Some(entry) = &plan.transition {
            state.logs.push(entry.clone());
        }
        Ok(plan)
    }

    async fn delete_product(&self, id: ProductId) -> Result<u64, InventoryError> {
        let mut state = self.state.write().await;
        if state.products.shift_remove(&id).is_none() {
            return Err(InventoryError::ProductNotFound(*id.as_uuid()));
        }
        let before = state.logs.len();
        state.logs.retain(|entry| entry.product_id != id);
        Ok((before - state.logs.len()) as u64)
    }

    async fn append_log(&self, entry: &CheckoutLogEntry) -> Result<(), InventoryError> {
        let mut state = self.state.write().await;
        if !state.products.contains_key(&entry.product_id) {
            return Err(InventoryError::ProductNotFound(*entry.product_id.as_uuid()));
        }
        state.logs.push(entry.clone());
        Ok(())
    }

    async fn history(&self, id: ProductId) -> Result<Vec<CheckoutHistoryEntry>, InventoryError> {
        let state = self.state.read().await;
        let product_name = state.products.get(&id).map(|p| p.name.clone());
        let mut entries: Vec<CheckoutHistoryEntry> = state
            .logs
            .iter()
            .rev()
            .filter(|entry| entry.product_id == id)
            .map(|entry| CheckoutHistoryEntry {
                entry: entry.clone(),
                product_name: product_name.clone(),
            })
            .collect();
        entries.sort_by(|a, b| b.entry.timestamp.cmp(&a.entry.timestamp));
        Ok(entries)
    }
}
