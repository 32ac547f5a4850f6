//! Database operations for sales.
//!
//! Sale registration is the one place stock is decremented. A separate
//! check-then-write would let two concurrent sales both pass the check
//! and drive stock negative, so the check-and-decrement is a single
//! conditional `UPDATE`, and the sale insert shares its transaction:
//! both commit or neither does.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use mercadito_core::SaleId;

use super::{RepositoryError, counters};
use crate::models::sale::{RecordSaleInput, Sale};

/// Internal row type for sale queries.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: i32,
    customer: String,
    product: String,
    quantity: i32,
    seller: String,
    sale_date: NaiveDate,
    unit_price: Decimal,
    total: Decimal,
    created_at: DateTime<Utc>,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Self {
            id: SaleId::new(row.id),
            customer: row.customer,
            product: row.product,
            quantity: row.quantity,
            seller: row.seller,
            sale_date: row.sale_date,
            unit_price: row.unit_price,
            total: row.total,
            created_at: row.created_at,
        }
    }
}

/// Result of the conditional stock decrement.
#[derive(Debug, sqlx::FromRow)]
struct DecrementRow {
    price: Decimal,
}

/// Repository for sale database operations.
pub struct SaleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SaleRepository<'a> {
    /// Create a new sale repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all sales, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Sale>, RepositoryError> {
        let rows: Vec<SaleRow> = sqlx::query_as(
            r"
            SELECT id, customer, product, quantity, seller, sale_date,
                   unit_price, total, created_at
            FROM sales
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Register a sale, decrementing product stock atomically.
    ///
    /// In one transaction:
    /// 1. Conditionally decrement stock (`quantity >= requested` guards
    ///    the update, so stock can never go negative).
    /// 2. If no row matched, distinguish "unknown product" from
    ///    "insufficient stock" and reject without writing anything.
    /// 3. Allocate the sale ID, compute the total from the price read in
    ///    step 1, and insert the sale row.
    ///
    /// The sale date is set server-side to today.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the quantity is below 1
    /// (a negative quantity would turn the decrement into an increment),
    /// `RepositoryError::NotFound` if the product doesn't exist,
    /// `RepositoryError::InsufficientStock` if fewer units are in stock
    /// than requested, `RepositoryError::CounterMissing` if the `sales`
    /// counter is not provisioned, or `RepositoryError::Database` if a
    /// query fails.
    pub async fn record(&self, input: &RecordSaleInput) -> Result<Sale, RepositoryError> {
        if input.quantity < 1 {
            return Err(RepositoryError::Conflict(format!(
                "sale quantity must be at least 1, got {}",
                input.quantity
            )));
        }

        let mut tx = self.pool.begin().await?;

        let decremented: Option<DecrementRow> = sqlx::query_as(
            r"
            UPDATE products
            SET quantity = quantity - $1, updated_at = NOW()
            WHERE name = $2 AND quantity >= $1
            RETURNING price
            ",
        )
        .bind(input.quantity)
        .bind(&input.product)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(decrement) = decremented else {
            // Either the product is unknown or it exists with too little
            // stock. Read it back to report which.
            let available: Option<i32> = sqlx::query_scalar(
                r"
                SELECT quantity FROM products WHERE name = $1
                ",
            )
            .bind(&input.product)
            .fetch_optional(&mut *tx)
            .await?;

            return match available {
                Some(available) => Err(RepositoryError::InsufficientStock { available }),
                None => Err(RepositoryError::NotFound),
            };
        };

        let id = counters::next_id(&mut tx, counters::SALES).await?;
        let total = decrement.price * Decimal::from(input.quantity);
        let sale_date = Utc::now().date_naive();

        let row: SaleRow = sqlx::query_as(
            r"
            INSERT INTO sales (id, customer, product, quantity, seller,
                               sale_date, unit_price, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, customer, product, quantity, seller, sale_date,
                      unit_price, total, created_at
            ",
        )
        .bind(id)
        .bind(&input.customer)
        .bind(&input.product)
        .bind(input.quantity)
        .bind(&input.seller)
        .bind(sale_date)
        .bind(decrement.price)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Count all sales.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM sales
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Sum of sale totals for a given date.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn revenue_for(&self, date: NaiveDate) -> Result<Decimal, RepositoryError> {
        let total: Option<Decimal> = sqlx::query_scalar(
            r"
            SELECT SUM(total) FROM sales WHERE sale_date = $1
            ",
        )
        .bind(date)
        .fetch_one(self.pool)
        .await?;

        Ok(total.unwrap_or_default())
    }
}
