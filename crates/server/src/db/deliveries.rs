//! Database operations for deliveries.
//!
//! Deliveries are append-only: they are recorded with a geocoded
//! position and later rendered on the map and the route manifest.
//! Their IDs come from an identity column, not from the counters table.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use mercadito_core::{DeliveryId, OrderId};

use super::RepositoryError;
use crate::models::delivery::{CreateDeliveryInput, Delivery};

/// Internal row type for delivery queries.
#[derive(Debug, sqlx::FromRow)]
struct DeliveryRow {
    id: i32,
    deliverer: String,
    address: String,
    delivery_date: NaiveDate,
    lat: f64,
    lon: f64,
    order_id: Option<i32>,
    created_at: DateTime<Utc>,
}

impl From<DeliveryRow> for Delivery {
    fn from(row: DeliveryRow) -> Self {
        Self {
            id: DeliveryId::new(row.id),
            deliverer: row.deliverer,
            address: row.address,
            delivery_date: row.delivery_date,
            lat: row.lat,
            lon: row.lon,
            order_id: row.order_id.map(OrderId::new),
            created_at: row.created_at,
        }
    }
}

/// Repository for delivery database operations.
pub struct DeliveryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DeliveryRepository<'a> {
    /// Create a new delivery repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all deliveries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Delivery>, RepositoryError> {
        let rows: Vec<DeliveryRow> = sqlx::query_as(
            r"
            SELECT id, deliverer, address, delivery_date, lat, lon, order_id, created_at
            FROM deliveries
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List deliveries scheduled for a given date, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Delivery>, RepositoryError> {
        let rows: Vec<DeliveryRow> = sqlx::query_as(
            r"
            SELECT id, deliverer, address, delivery_date, lat, lon, order_id, created_at
            FROM deliveries
            WHERE delivery_date = $1
            ORDER BY id ASC
            ",
        )
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Record a delivery.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &CreateDeliveryInput) -> Result<Delivery, RepositoryError> {
        let row: DeliveryRow = sqlx::query_as(
            r"
            INSERT INTO deliveries (deliverer, address, delivery_date, lat, lon, order_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, deliverer, address, delivery_date, lat, lon, order_id, created_at
            ",
        )
        .bind(&input.deliverer)
        .bind(&input.address)
        .bind(input.delivery_date)
        .bind(input.lat)
        .bind(input.lon)
        .bind(input.order_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Count all deliveries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM deliveries
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
