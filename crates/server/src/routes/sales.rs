//! Sales screen: summary cards, sale registration, and the sales table.
//!
//! Registration goes through the stock-aware transaction in the sales
//! repository; an insufficient-stock rejection comes back to the screen
//! as a message with the available quantity.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, Redirect},
    routing::get,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    db::{
        CustomerRepository, ProductRepository, RepositoryError, SaleRepository, SellerRepository,
    },
    filters,
    models::sale::{RecordSaleInput, Sale},
    state::AppState,
};

/// Build the sales sub-router.
pub fn router() -> Router<AppState> {
    Router::new().route("/sales", get(index).post(create))
}

/// Outcome tokens from a redirect, including the available stock when a
/// sale was rejected.
#[derive(Debug, Deserialize)]
pub struct SalesFlashQuery {
    pub success: Option<String>,
    pub error: Option<String>,
    pub available: Option<i32>,
}

/// Sale view for templates.
#[derive(Debug, Clone)]
pub struct SaleView {
    pub id: i32,
    pub customer: String,
    pub product: String,
    pub quantity: i32,
    pub seller: String,
    pub sale_date: String,
    pub unit_price: Decimal,
    pub total: Decimal,
}

impl From<&Sale> for SaleView {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id.as_i32(),
            customer: sale.customer.clone(),
            product: sale.product.clone(),
            quantity: sale.quantity,
            seller: sale.seller.clone(),
            sale_date: sale.sale_date.format("%d/%m/%Y").to_string(),
            unit_price: sale.unit_price,
            total: sale.total,
        }
    }
}

/// Summary cards at the top of the screen.
#[derive(Debug, Clone)]
pub struct SalesSummary {
    pub total_sales: String,
    pub revenue_today: Decimal,
    pub customers: String,
    pub products: String,
}

impl Default for SalesSummary {
    fn default() -> Self {
        Self {
            total_sales: "0".to_string(),
            revenue_today: Decimal::ZERO,
            customers: "0".to_string(),
            products: "0".to_string(),
        }
    }
}

/// Sales screen template.
#[derive(Template)]
#[template(path = "sales/index.html")]
pub struct SalesIndexTemplate {
    pub current_path: String,
    pub summary: SalesSummary,
    pub sales: Vec<SaleView>,
    pub customers: Vec<String>,
    pub products: Vec<String>,
    pub sellers: Vec<String>,
    pub message: Option<String>,
    pub error_message: Option<String>,
}

fn flash_messages(query: &SalesFlashQuery) -> (Option<String>, Option<String>) {
    let message = query.success.as_deref().map(|token| match token {
        "created" => "Venta registrada.".to_string(),
        other => other.to_string(),
    });
    let error_message = query.error.as_deref().map(|token| match token {
        "insufficient_stock" => {
            let available = query.available.unwrap_or(0);
            format!("Stock insuficiente: quedan {available} unidades.")
        }
        "product_not_found" => "El producto seleccionado no existe.".to_string(),
        "invalid_quantity" => "La cantidad debe ser mayor a cero.".to_string(),
        "save_failed" => "No se pudo registrar la venta.".to_string(),
        other => other.to_string(),
    });
    (message, error_message)
}

/// Sales screen handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SalesFlashQuery>,
) -> Html<String> {
    let sale_repo = SaleRepository::new(state.pool());
    let customer_repo = CustomerRepository::new(state.pool());
    let product_repo = ProductRepository::new(state.pool());
    let seller_repo = SellerRepository::new(state.pool());

    let sales = sale_repo.list().await.unwrap_or_else(|e| {
        tracing::error!("Failed to list sales: {e}");
        vec![]
    });
    let summary = build_summary(&state, &sales).await;

    let customers = customer_repo
        .list()
        .await
        .map(|customers| customers.into_iter().map(|c| c.name).collect())
        .unwrap_or_default();
    let products = product_repo
        .list()
        .await
        .map(|products| products.into_iter().map(|p| p.name).collect())
        .unwrap_or_default();
    let sellers = seller_repo
        .list()
        .await
        .map(|sellers| sellers.into_iter().map(|s| s.name).collect())
        .unwrap_or_default();

    let (message, error_message) = flash_messages(&query);
    let template = SalesIndexTemplate {
        current_path: "/sales".to_string(),
        summary,
        sales: sales.iter().map(SaleView::from).collect(),
        customers,
        products,
        sellers,
        message,
        error_message,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

async fn build_summary(state: &AppState, sales: &[Sale]) -> SalesSummary {
    let sale_repo = SaleRepository::new(state.pool());
    let revenue_today = sale_repo
        .revenue_for(Utc::now().date_naive())
        .await
        .unwrap_or_default();
    let customers = CustomerRepository::new(state.pool())
        .count()
        .await
        .unwrap_or(0);
    let products = ProductRepository::new(state.pool())
        .count()
        .await
        .unwrap_or(0);

    SalesSummary {
        total_sales: sales.len().to_string(),
        revenue_today,
        customers: customers.to_string(),
        products: products.to_string(),
    }
}

/// Register a sale from the screen form.
#[instrument(skip(state, input))]
pub async fn create(State(state): State<AppState>, Form(input): Form<RecordSaleInput>) -> Redirect {
    let repo = SaleRepository::new(state.pool());
    match repo.record(&input).await {
        Ok(sale) => {
            tracing::info!(
                sale_id = sale.id.as_i32(),
                product = %sale.product,
                quantity = sale.quantity,
                "Sale registered"
            );
            Redirect::to("/sales?success=created")
        }
        Err(RepositoryError::InsufficientStock { available }) => Redirect::to(&format!(
            "/sales?error=insufficient_stock&available={available}"
        )),
        Err(RepositoryError::NotFound) => Redirect::to("/sales?error=product_not_found"),
        Err(RepositoryError::Conflict(reason)) => {
            tracing::warn!("Rejected sale: {reason}");
            Redirect::to("/sales?error=invalid_quantity")
        }
        Err(e) => {
            tracing::error!("Failed to register sale: {e}");
            Redirect::to("/sales?error=save_failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_messages_insufficient_stock() {
        let query = SalesFlashQuery {
            success: None,
            error: Some("insufficient_stock".to_string()),
            available: Some(2),
        };
        let (message, error_message) = flash_messages(&query);
        assert!(message.is_none());
        assert_eq!(
            error_message.as_deref(),
            Some("Stock insuficiente: quedan 2 unidades.")
        );
    }

    #[test]
    fn test_flash_messages_invalid_quantity() {
        let query = SalesFlashQuery {
            success: None,
            error: Some("invalid_quantity".to_string()),
            available: None,
        };
        let (_, error_message) = flash_messages(&query);
        assert_eq!(
            error_message.as_deref(),
            Some("La cantidad debe ser mayor a cero.")
        );
    }

    #[test]
    fn test_flash_messages_success() {
        let query = SalesFlashQuery {
            success: Some("created".to_string()),
            error: None,
            available: None,
        };
        let (message, _) = flash_messages(&query);
        assert_eq!(message.as_deref(), Some("Venta registrada."));
    }
}
