//! Integration tests for Mercadito.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and run migrations
//! cargo run -p mercadito-cli -- migrate
//!
//! # Database-backed tests
//! cargo test -p mercadito-integration-tests -- --ignored
//!
//! # Screen tests additionally need the server running:
//! cargo run -p mercadito-server
//! ```
//!
//! Tests are `#[ignore]`d by default because they need external
//! services; unit tests live next to the code they cover.

use secrecy::SecretString;
use sqlx::PgPool;

/// Shared context for database-backed tests.
pub struct TestContext {
    pub pool: PgPool,
}

impl TestContext {
    /// Connect to the test database.
    ///
    /// # Panics
    ///
    /// Panics if no database URL is configured or the connection fails;
    /// these tests only run when the environment is prepared.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();
        let url = std::env::var("MERCADITO_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .map(SecretString::from)
            .expect("MERCADITO_DATABASE_URL or DATABASE_URL must be set");

        let pool = mercadito_server::db::create_pool(&url)
            .await
            .expect("Failed to connect to test database");

        Self { pool }
    }
}

/// Pool that parses its URL but never connects.
///
/// For exercising repository guards that must reject input before
/// touching the database; tests using it run without PostgreSQL.
///
/// # Panics
///
/// Panics if the static URL fails to parse, which it does not.
#[must_use]
pub fn offline_pool() -> PgPool {
    PgPool::connect_lazy("postgres://mercadito@localhost/mercadito")
        .expect("static database URL should parse")
}

/// Base URL of a running server (screen tests).
#[must_use]
pub fn server_base_url() -> String {
    std::env::var("MERCADITO_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A unique suffix so concurrent test runs don't collide on names.
#[must_use]
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
