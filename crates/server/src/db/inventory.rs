//! Database operations for warehouse inventory items.
//!
//! Inventory IDs are caller-supplied strings (shelf/bin labels), so there
//! is no counter involvement here.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::inventory_item::{
    CreateInventoryItemInput, InventoryItem, UpdateInventoryItemInput,
};

/// Internal row type for inventory queries.
#[derive(Debug, sqlx::FromRow)]
struct InventoryItemRow {
    id: String,
    product_name: String,
    quantity: i32,
    created_at: DateTime<Utc>,
}

impl From<InventoryItemRow> for InventoryItem {
    fn from(row: InventoryItemRow) -> Self {
        Self {
            id: row.id,
            product_name: row.product_name,
            quantity: row.quantity,
            created_at: row.created_at,
        }
    }
}

/// Repository for inventory database operations.
pub struct InventoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InventoryRepository<'a> {
    /// Create a new inventory repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all inventory items, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<InventoryItem>, RepositoryError> {
        let rows: Vec<InventoryItemRow> = sqlx::query_as(
            r"
            SELECT id, product_name, quantity, created_at
            FROM inventory_items
            ORDER BY created_at ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an inventory item by its caller-supplied ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &str) -> Result<Option<InventoryItem>, RepositoryError> {
        let row: Option<InventoryItemRow> = sqlx::query_as(
            r"
            SELECT id, product_name, quantity, created_at
            FROM inventory_items
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new inventory item under the caller-supplied ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the ID is already taken, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        input: &CreateInventoryItemInput,
    ) -> Result<InventoryItem, RepositoryError> {
        let row: InventoryItemRow = sqlx::query_as(
            r"
            INSERT INTO inventory_items (id, product_name, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, product_name, quantity, created_at
            ",
        )
        .bind(&input.id)
        .bind(&input.product_name)
        .bind(input.quantity)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!(
                    "inventory item '{}' already exists",
                    input.id
                ));
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Update an inventory item's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: &str,
        input: &UpdateInventoryItemInput,
    ) -> Result<InventoryItem, RepositoryError> {
        let row: Option<InventoryItemRow> = sqlx::query_as(
            r"
            UPDATE inventory_items
            SET product_name = $2, quantity = $3
            WHERE id = $1
            RETURNING id, product_name, quantity, created_at
            ",
        )
        .bind(id)
        .bind(&input.product_name)
        .bind(input.quantity)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete an inventory item.
    ///
    /// Idempotent: deleting an already-deleted ID is a no-op.
    ///
    /// # Returns
    ///
    /// Returns `true` if the item was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM inventory_items WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
