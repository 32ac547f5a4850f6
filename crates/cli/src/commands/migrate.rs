//! Database migration command.
//!
//! Applies the migrations in `crates/server/migrations/`, which also
//! provision the `counters` rows the sequential-ID allocator requires.

use mercadito_server::db;

use super::{CommandError, database_url};

/// Run database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
