//! Database operations for deliverers and sellers.
//!
//! Both tables back `<select>` options on the delivery and sales
//! screens. Rows are provisioned with the CLI `seed` command.

use sqlx::PgPool;

use mercadito_core::{DelivererId, SellerId};

use super::RepositoryError;
use crate::models::staff::{Deliverer, Seller};

#[derive(Debug, sqlx::FromRow)]
struct NamedRow {
    id: i32,
    name: String,
}

/// Repository for deliverer database operations.
pub struct DelivererRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DelivererRepository<'a> {
    /// Create a new deliverer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all deliverers, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Deliverer>, RepositoryError> {
        let rows: Vec<NamedRow> = sqlx::query_as(
            r"
            SELECT id, name FROM deliverers ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Deliverer {
                id: DelivererId::new(row.id),
                name: row.name,
            })
            .collect())
    }

    /// Add a deliverer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is already taken,
    /// or `RepositoryError::Database` for other database errors.
    pub async fn create(&self, name: &str) -> Result<Deliverer, RepositoryError> {
        let row: NamedRow = sqlx::query_as(
            r"
            INSERT INTO deliverers (name) VALUES ($1) RETURNING id, name
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_duplicate(e, "deliverer", name))?;

        Ok(Deliverer {
            id: DelivererId::new(row.id),
            name: row.name,
        })
    }
}

/// Repository for seller database operations.
pub struct SellerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SellerRepository<'a> {
    /// Create a new seller repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all sellers, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Seller>, RepositoryError> {
        let rows: Vec<NamedRow> = sqlx::query_as(
            r"
            SELECT id, name FROM sellers ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Seller {
                id: SellerId::new(row.id),
                name: row.name,
            })
            .collect())
    }

    /// Add a seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is already taken,
    /// or `RepositoryError::Database` for other database errors.
    pub async fn create(&self, name: &str) -> Result<Seller, RepositoryError> {
        let row: NamedRow = sqlx::query_as(
            r"
            INSERT INTO sellers (name) VALUES ($1) RETURNING id, name
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_duplicate(e, "seller", name))?;

        Ok(Seller {
            id: SellerId::new(row.id),
            name: row.name,
        })
    }
}

fn conflict_on_duplicate(e: sqlx::Error, kind: &str, name: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{kind} '{name}' already exists"));
    }
    RepositoryError::Database(e)
}
