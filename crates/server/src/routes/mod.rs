//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Health check
//! GET  /ready                     - Readiness check (database ping)
//!
//! # Dashboard
//! GET  /                          - Landing page with headline counts
//!
//! # Customers
//! GET  /customers                 - Form + customer table
//! POST /customers                 - Create customer
//! POST /customers/{id}            - Update customer
//! POST /customers/{id}/delete     - Delete customer
//!
//! # Products
//! GET  /products                  - Form + product table
//! POST /products                  - Create product
//! POST /products/{id}             - Update product
//! POST /products/{id}/delete      - Delete product
//!
//! # Inventory
//! GET  /inventory                 - Form + inventory table
//! POST /inventory                 - Create item (caller-supplied ID)
//! POST /inventory/{id}            - Update item
//! POST /inventory/{id}/delete     - Delete item
//!
//! # Orders
//! GET  /orders                    - Form with selectors + order table
//! POST /orders                    - Create order (resolves customer address)
//! POST /orders/{id}/delete        - Delete order
//!
//! # Deliveries
//! GET  /deliveries                - Form, map, delivery history
//! POST /deliveries                - Geocode address and record delivery
//! GET  /deliveries/manifest.pdf   - Route manifest PDF
//!
//! # Sales
//! GET  /sales                     - Summary cards, form, sales table
//! POST /sales                     - Register sale (stock-aware)
//! ```
//!
//! Outcome messages travel as query-parameter tokens
//! (`?success=created`, `?error=insufficient_stock&available=2`) and are
//! translated to display text when the screen renders.

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::state::AppState;

pub mod customers;
pub mod dashboard;
pub mod deliveries;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod sales;

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .merge(dashboard::router())
        .merge(customers::router())
        .merge(products::router())
        .merge(inventory::router())
        .merge(orders::router())
        .merge(deliveries::router())
        .merge(sales::router())
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}

/// Readiness probe: verifies the database answers.
async fn ready(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(|e| {
            tracing::error!("Readiness check failed: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        })?;
    Ok("ready")
}
