//! PostgreSQL implementation of the persistence layer.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

use super::InventoryStore;
use super::models::{CheckoutLogRow, ProductRow};
use crate::domain::{
    CheckoutHistoryEntry, CheckoutLogEntry, Product, ProductId, ProductPatch, UpdatePlan,
};
use crate::error::InventoryError;

const PRODUCT_COLUMNS: &str = "id, name, description, category, location, status, picked_by, \
     serial_number, value, purchase_date, created_at, updated_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Schema lives in `migrations/`; run [`PostgresStore::migrate`] once at
/// startup.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`InventoryError::Storage`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), InventoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| InventoryError::Storage(e.to_string()))
    }

    async fn lock_product(
        tx: &mut Transaction<'static, Postgres>,
        id: ProductId,
    ) -> Result<Product, InventoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(InventoryError::ProductNotFound(*id.as_uuid()))?;
        Product::try_from(row)
    }

    async fn insert_log(
        tx: &mut Transaction<'static, Postgres>,
        entry: &CheckoutLogEntry,
    ) -> Result<(), InventoryError> {
        sqlx::query(
            "INSERT INTO checkout_logs \
             (id, product_id, action, previous_status, new_status, picked_by, \"timestamp\", updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(entry.id)
        .bind(entry.product_id.as_uuid())
        .bind(entry.action.as_str())
        .bind(entry.previous_status.map(|s| s.as_str()))
        .bind(entry.new_status.map(|s| s.as_str()))
        .bind(entry.picked_by.as_deref())
        .bind(entry.timestamp)
        .bind(&entry.updated_by)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list_products(&self) -> Result<Vec<Product>, InventoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, InventoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::ProductNotFound(*id.as_uuid()))?;

        Product::try_from(row)
    }

    async fn insert_product(&self, product: &Product) -> Result<(), InventoryError> {
        sqlx::query(&format!(
            "INSERT INTO products ({PRODUCT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"
        ))
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.location)
        .bind(product.status.as_str())
        .bind(product.picked_by.as_deref())
        .bind(product.serial_number.as_deref())
        .bind(product.value)
        .bind(product.purchase_date)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
        actor: &str,
    ) -> Result<UpdatePlan, InventoryError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent updates of the same product, so
        // each status transition is logged exactly once.
        let existing = Self::lock_product(&mut tx, id).await?;
        let plan = existing.apply_patch(patch, actor, Utc::now())?;
        let product = &plan.product;

        sqlx::query(
            "UPDATE products \
             SET name = $1, description = $2, category = $3, location = $4, status = $5, \
                 picked_by = $6, serial_number = $7, value = $8, purchase_date = $9, updated_at = $10 \
             WHERE id = $11",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.location)
        .bind(product.status.as_str())
        .bind(product.picked_by.as_deref())
        .bind(product.serial_number.as_deref())
        .bind(product.value)
        .bind(product.purchase_date)
        .bind(product.updated_at)
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await?;

        if let Some(entry) = &plan.transition {
            Self::insert_log(&mut tx, entry).await?;
        }

        tx.commit().await?;
        Ok(plan)
    }

    async fn delete_product(&self, id: ProductId) -> Result<u64, InventoryError> {
        let mut tx = self.pool.begin().await?;

        let logs = sqlx::query("DELETE FROM checkout_logs WHERE product_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(InventoryError::ProductNotFound(*id.as_uuid()));
        }

        tx.commit().await?;
        Ok(logs.rows_affected())
    }

    async fn append_log(&self, entry: &CheckoutLogEntry) -> Result<(), InventoryError> {
        let mut tx = self.pool.begin().await?;
        // Shared lock keeps the product from being deleted underneath us.
        let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM products WHERE id = $1 FOR SHARE")
            .bind(entry.product_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(InventoryError::ProductNotFound(*entry.product_id.as_uuid()));
        }
        Self::insert_log(&mut tx, entry).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn history(&self, id: ProductId) -> Result<Vec<CheckoutHistoryEntry>, InventoryError> {
        let rows = sqlx::query_as::<_, CheckoutLogRow>(
            "SELECT l.id, l.product_id, l.action, l.previous_status, l.new_status, l.picked_by, \
                    l.\"timestamp\", l.updated_by, p.name AS product_name \
             FROM checkout_logs l \
             LEFT JOIN products p ON p.id = l.product_id \
             WHERE l.product_id = $1 \
             ORDER BY l.\"timestamp\" DESC",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CheckoutHistoryEntry::try_from).collect()
    }
}
