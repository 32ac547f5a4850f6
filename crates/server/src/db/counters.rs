//! Sequential ID allocation from the `counters` table.
//!
//! The read and increment are one statement: the row lock taken by
//! `UPDATE` serializes concurrent allocations, so returned IDs are
//! globally unique and, under serial use, gap-free. A read followed by a
//! separate increment would let two concurrent callers hand out the same
//! ID.
//!
//! Counter rows are provisioned by migration. Allocating against a name
//! with no row is an error, never an implicit bootstrap.

use sqlx::PgConnection;

use super::RepositoryError;

/// Counter name for customer IDs.
pub const CUSTOMERS: &str = "customers";
/// Counter name for product IDs.
pub const PRODUCTS: &str = "products";
/// Counter name for order IDs.
pub const ORDERS: &str = "orders";
/// Counter name for sale IDs.
pub const SALES: &str = "sales";

/// Allocate the next ID from a named counter.
///
/// Runs a single atomic increment-and-return. Call this inside the same
/// transaction as the insert that consumes the ID so a failed insert
/// rolls the allocation back instead of burning a number.
///
/// # Errors
///
/// Returns `RepositoryError::CounterMissing` if the counter row does not
/// exist, or `RepositoryError::Database` if the query fails.
pub async fn next_id(conn: &mut PgConnection, counter: &str) -> Result<i32, RepositoryError> {
    let id: Option<i32> = sqlx::query_scalar(
        r"
        UPDATE counters
        SET last_id = last_id + 1
        WHERE name = $1
        RETURNING last_id
        ",
    )
    .bind(counter)
    .fetch_optional(conn)
    .await?;

    id.ok_or_else(|| RepositoryError::CounterMissing(counter.to_string()))
}

/// Read a counter's current value without advancing it.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn current(conn: &mut PgConnection, counter: &str) -> Result<Option<i32>, RepositoryError> {
    let value: Option<i32> = sqlx::query_scalar(
        r"
        SELECT last_id FROM counters WHERE name = $1
        ",
    )
    .bind(counter)
    .fetch_optional(conn)
    .await?;

    Ok(value)
}
