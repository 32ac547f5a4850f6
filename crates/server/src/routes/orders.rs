//! Orders screen: order form with customer/product selectors and the
//! order list.
//!
//! The customer's address is resolved server-side when the order is
//! submitted; the form never carries an address field.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use chrono::Utc;
use tracing::instrument;

use mercadito_core::OrderId;

use crate::{
    db::{CustomerRepository, OrderRepository, ProductRepository, RepositoryError},
    filters,
    models::order::{CreateOrderInput, Order},
    state::AppState,
};

use super::customers::FlashQuery;

/// Build the orders sub-router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index).post(create))
        .route("/orders/{id}/delete", post(delete))
}

/// Order view for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: i32,
    pub customer_name: String,
    pub product_name: String,
    pub quantity: i32,
    pub delivery_date: String,
    pub customer_address: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i32(),
            customer_name: order.customer_name.clone(),
            product_name: order.product_name.clone(),
            quantity: order.quantity,
            delivery_date: order.delivery_date.format("%d/%m/%Y").to_string(),
            customer_address: order.customer_address.clone(),
        }
    }
}

/// Selector option for templates.
#[derive(Debug, Clone)]
pub struct SelectorOption {
    pub name: String,
}

/// Orders screen template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub current_path: String,
    pub orders: Vec<OrderView>,
    pub customers: Vec<SelectorOption>,
    pub products: Vec<SelectorOption>,
    pub message: Option<String>,
    pub error_message: Option<String>,
}

fn flash_messages(query: &FlashQuery) -> (Option<String>, Option<String>) {
    let message = query.success.as_deref().map(|token| match token {
        "created" => "Pedido creado.".to_string(),
        "deleted" => "Pedido eliminado.".to_string(),
        other => other.to_string(),
    });
    let error_message = query.error.as_deref().map(|token| match token {
        "customer_not_found" => "El cliente seleccionado no existe.".to_string(),
        "past_delivery_date" => "La fecha de entrega no puede estar en el pasado.".to_string(),
        "invalid_quantity" => "La cantidad debe ser mayor a cero.".to_string(),
        "save_failed" => "No se pudo guardar el pedido.".to_string(),
        other => other.to_string(),
    });
    (message, error_message)
}

/// Orders screen handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<FlashQuery>) -> Html<String> {
    let orders = match OrderRepository::new(state.pool()).list().await {
        Ok(orders) => orders.iter().map(OrderView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to list orders: {e}");
            vec![]
        }
    };
    let customers = selector_options(
        CustomerRepository::new(state.pool())
            .list()
            .await
            .map(|customers| customers.into_iter().map(|c| c.name).collect()),
        "customers",
    );
    let products = selector_options(
        ProductRepository::new(state.pool())
            .list()
            .await
            .map(|products| products.into_iter().map(|p| p.name).collect()),
        "products",
    );

    let (message, error_message) = flash_messages(&query);
    let template = OrdersIndexTemplate {
        current_path: "/orders".to_string(),
        orders,
        customers,
        products,
        message,
        error_message,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Create an order from the screen form.
///
/// Rejects delivery dates in the past; the customer's address is
/// resolved inside the repository transaction.
#[instrument(skip(state, input))]
pub async fn create(State(state): State<AppState>, Form(input): Form<CreateOrderInput>) -> Redirect {
    if input.delivery_date < Utc::now().date_naive() {
        return Redirect::to("/orders?error=past_delivery_date");
    }

    let repo = OrderRepository::new(state.pool());
    match repo.create(&input).await {
        Ok(order) => {
            tracing::info!(order_id = order.id.as_i32(), "Order created");
            Redirect::to("/orders?success=created")
        }
        Err(RepositoryError::NotFound) => Redirect::to("/orders?error=customer_not_found"),
        Err(RepositoryError::Conflict(reason)) => {
            tracing::warn!("Rejected order: {reason}");
            Redirect::to("/orders?error=invalid_quantity")
        }
        Err(e) => {
            tracing::error!("Failed to create order: {e}");
            Redirect::to("/orders?error=save_failed")
        }
    }
}

/// Delete an order. Deleting a missing order is a no-op.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Redirect {
    let repo = OrderRepository::new(state.pool());
    match repo.delete(OrderId::new(id)).await {
        Ok(_) => Redirect::to("/orders?success=deleted"),
        Err(e) => {
            tracing::error!("Failed to delete order {id}: {e}");
            Redirect::to("/orders?error=save_failed")
        }
    }
}

fn selector_options(
    names: Result<Vec<String>, RepositoryError>,
    entity: &str,
) -> Vec<SelectorOption> {
    match names {
        Ok(names) => names.into_iter().map(|name| SelectorOption { name }).collect(),
        Err(e) => {
            tracing::error!("Failed to load {entity} selector: {e}");
            vec![]
        }
    }
}
