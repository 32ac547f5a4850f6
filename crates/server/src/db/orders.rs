//! Database operations for orders.
//!
//! Orders reference customers and products by display name. The
//! customer's address is resolved inside the create transaction so the
//! order carries a snapshot of where it should be delivered.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use mercadito_core::OrderId;

use super::{RepositoryError, counters};
use crate::models::order::{CreateOrderInput, Order};

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    customer_name: String,
    product_name: String,
    quantity: i32,
    delivery_date: NaiveDate,
    customer_address: String,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            customer_name: row.customer_name,
            product_name: row.product_name,
            quantity: row.quantity,
            delivery_date: row.delivery_date,
            customer_address: row.customer_address,
            created_at: row.created_at,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r"
            SELECT id, customer_name, product_name, quantity, delivery_date,
                   customer_address, created_at
            FROM orders
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r"
            SELECT id, customer_name, product_name, quantity, delivery_date,
                   customer_address, created_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new order with a sequential ID.
    ///
    /// Resolves the named customer's address inside the transaction; an
    /// unknown customer name fails the whole operation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the quantity is below 1,
    /// `RepositoryError::NotFound` if no customer has the given name,
    /// `RepositoryError::CounterMissing` if the `orders` counter is not
    /// provisioned, or `RepositoryError::Database` if a query fails.
    pub async fn create(&self, input: &CreateOrderInput) -> Result<Order, RepositoryError> {
        if input.quantity < 1 {
            return Err(RepositoryError::Conflict(format!(
                "order quantity must be at least 1, got {}",
                input.quantity
            )));
        }

        let mut tx = self.pool.begin().await?;

        let address: Option<String> = sqlx::query_scalar(
            r"
            SELECT address FROM customers WHERE name = $1
            ",
        )
        .bind(&input.customer_name)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(customer_address) = address else {
            return Err(RepositoryError::NotFound);
        };

        let id = counters::next_id(&mut tx, counters::ORDERS).await?;

        let row: OrderRow = sqlx::query_as(
            r"
            INSERT INTO orders (id, customer_name, product_name, quantity,
                                delivery_date, customer_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, customer_name, product_name, quantity, delivery_date,
                      customer_address, created_at
            ",
        )
        .bind(id)
        .bind(&input.customer_name)
        .bind(&input.product_name)
        .bind(input.quantity)
        .bind(input.delivery_date)
        .bind(&customer_address)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Delete an order.
    ///
    /// Idempotent: deleting an already-deleted ID is a no-op.
    ///
    /// # Returns
    ///
    /// Returns `true` if the order was deleted, `false` if it didn't
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM orders WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
