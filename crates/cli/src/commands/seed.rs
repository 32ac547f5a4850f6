//! Seeding command for deliverers and sellers.
//!
//! Both tables feed `<select>` options on the delivery and sales
//! screens; there is no screen for managing them, so this is the only
//! write path.

use mercadito_server::db::{self, DelivererRepository, RepositoryError, SellerRepository};

use super::{CommandError, database_url};

/// Insert the given deliverers and sellers, skipping duplicates.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or an insert fails for a reason other than a duplicate name.
pub async fn run(deliverers: &[String], sellers: &[String]) -> Result<(), CommandError> {
    let url = database_url()?;
    let pool = db::create_pool(&url).await?;

    let deliverer_repo = DelivererRepository::new(&pool);
    for name in deliverers {
        match deliverer_repo.create(name).await {
            Ok(deliverer) => tracing::info!("Added deliverer '{}'", deliverer.name),
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!("Deliverer '{name}' already exists, skipping");
            }
            Err(RepositoryError::Database(e)) => return Err(e.into()),
            Err(e) => {
                tracing::error!("Unexpected error adding deliverer '{name}': {e}");
            }
        }
    }

    let seller_repo = SellerRepository::new(&pool);
    for name in sellers {
        match seller_repo.create(name).await {
            Ok(seller) => tracing::info!("Added seller '{}'", seller.name),
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!("Seller '{name}' already exists, skipping");
            }
            Err(RepositoryError::Database(e)) => return Err(e.into()),
            Err(e) => {
                tracing::error!("Unexpected error adding seller '{name}': {e}");
            }
        }
    }

    tracing::info!(
        "Seed complete: {} deliverers, {} sellers processed",
        deliverers.len(),
        sellers.len()
    );
    Ok(())
}
