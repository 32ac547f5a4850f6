//! Database operations for Mercadito `PostgreSQL`.
//!
//! One repository per entity, each owning every query for its table:
//!
//! - `customers` - Customer records ([`CustomerRepository`])
//! - `products` - Products with sellable stock ([`ProductRepository`])
//! - `inventory_items` - Warehouse inventory ([`InventoryRepository`])
//! - `orders` - Orders referencing customers/products by name ([`OrderRepository`])
//! - `deliveries` - Geocoded deliveries ([`DeliveryRepository`])
//! - `sales` - Sales with transactional stock decrement ([`SaleRepository`])
//! - `deliverers` / `sellers` - Selector data ([`staff`])
//! - `counters` - Sequential ID allocation ([`counters`])
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p mercadito-cli -- migrate
//! ```

pub mod counters;
pub mod customers;
pub mod deliveries;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod sales;
pub mod staff;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use customers::CustomerRepository;
pub use deliveries::DeliveryRepository;
pub use inventory::InventoryRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use sales::SaleRepository;
pub use staff::{DelivererRepository, SellerRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate name).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A sequential-ID counter row is missing. Counters must be
    /// provisioned by migration before first use; absence aborts the
    /// operation.
    #[error("counter '{0}' is not provisioned")]
    CounterMissing(String),

    /// A sale requested more units than the product has in stock.
    /// The sale is rejected and nothing is written.
    #[error("insufficient stock: {available} available")]
    InsufficientStock {
        /// Units currently in stock.
        available: i32,
    },
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
