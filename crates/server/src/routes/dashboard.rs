//! Dashboard route handler: entity navigation plus headline counts.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tracing::instrument;

use crate::{
    db::{CustomerRepository, DeliveryRepository, ProductRepository, SaleRepository},
    filters,
    state::AppState,
};

/// Build the dashboard sub-router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Headline counts shown on the landing page.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub customers: String,
    pub products: String,
    pub sales: String,
    pub deliveries: String,
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self {
            customers: "0".to_string(),
            products: "0".to_string(),
            sales: "0".to_string(),
            deliveries: "0".to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub metrics: DashboardMetrics,
}

/// Dashboard handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let metrics = fetch_metrics(&state).await;

    let template = DashboardTemplate {
        current_path: "/".to_string(),
        metrics,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

async fn fetch_metrics(state: &AppState) -> DashboardMetrics {
    let customers = CustomerRepository::new(state.pool()).count().await;
    let products = ProductRepository::new(state.pool()).count().await;
    let sales = SaleRepository::new(state.pool()).count().await;
    let deliveries = DeliveryRepository::new(state.pool()).count().await;

    let count_or_zero = |result: Result<i64, crate::db::RepositoryError>, entity: &str| {
        result.map_or_else(
            |e| {
                tracing::error!("Failed to count {entity}: {e}");
                "0".to_string()
            },
            |n| n.to_string(),
        )
    };

    DashboardMetrics {
        customers: count_or_zero(customers, "customers"),
        products: count_or_zero(products, "products"),
        sales: count_or_zero(sales, "sales"),
        deliveries: count_or_zero(deliveries, "deliveries"),
    }
}
