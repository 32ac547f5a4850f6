//! Products screen: create/edit/delete products and list them.
//!
//! Stock shown here is the sellable quantity that sale registration
//! decrements; the warehouse counts live on the inventory screen.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use tracing::instrument;

use mercadito_core::ProductId;

use crate::{
    db::{ProductRepository, RepositoryError},
    filters,
    models::product::{CreateProductInput, Product, UpdateProductInput},
    state::AppState,
};

use super::customers::FlashQuery;

/// Build the products sub-router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(create))
        .route("/products/{id}", post(update))
        .route("/products/{id}/delete", post(delete))
}

/// Product view for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Plain decimal string, bound to the editable price input.
    pub price: String,
    pub quantity: i32,
    pub image_url: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.round_dp(2).to_string(),
            quantity: product.quantity,
            image_url: product.image_url.clone(),
        }
    }
}

/// Products screen template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub current_path: String,
    pub products: Vec<ProductView>,
    pub message: Option<String>,
    pub error_message: Option<String>,
}

fn flash_messages(query: &FlashQuery) -> (Option<String>, Option<String>) {
    let message = query.success.as_deref().map(|token| match token {
        "created" => "Producto creado.".to_string(),
        "updated" => "Producto actualizado.".to_string(),
        "deleted" => "Producto eliminado.".to_string(),
        other => other.to_string(),
    });
    let error_message = query.error.as_deref().map(|token| match token {
        "not_found" => "El producto no existe.".to_string(),
        "save_failed" => "No se pudo guardar el producto.".to_string(),
        other => other.to_string(),
    });
    (message, error_message)
}

/// Products screen handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<FlashQuery>) -> Html<String> {
    let repo = ProductRepository::new(state.pool());
    let products = match repo.list().await {
        Ok(products) => products.iter().map(ProductView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to list products: {e}");
            vec![]
        }
    };

    let (message, error_message) = flash_messages(&query);
    let template = ProductsIndexTemplate {
        current_path: "/products".to_string(),
        products,
        message,
        error_message,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Create a product from the screen form.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Form(input): Form<CreateProductInput>,
) -> Redirect {
    let repo = ProductRepository::new(state.pool());
    match repo.create(&input).await {
        Ok(product) => {
            tracing::info!(product_id = product.id.as_i32(), "Product created");
            Redirect::to("/products?success=created")
        }
        Err(e) => {
            tracing::error!("Failed to create product: {e}");
            Redirect::to("/products?error=save_failed")
        }
    }
}

/// Update a product's mutable fields.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(input): Form<UpdateProductInput>,
) -> Redirect {
    let repo = ProductRepository::new(state.pool());
    match repo.update(ProductId::new(id), &input).await {
        Ok(_) => Redirect::to("/products?success=updated"),
        Err(RepositoryError::NotFound) => Redirect::to("/products?error=not_found"),
        Err(e) => {
            tracing::error!("Failed to update product {id}: {e}");
            Redirect::to("/products?error=save_failed")
        }
    }
}

/// Delete a product. Deleting a missing product is a no-op.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Redirect {
    let repo = ProductRepository::new(state.pool());
    match repo.delete(ProductId::new(id)).await {
        Ok(_) => Redirect::to("/products?success=deleted"),
        Err(e) => {
            tracing::error!("Failed to delete product {id}: {e}");
            Redirect::to("/products?error=save_failed")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_product_view_formats_price() {
        let product = Product {
            id: ProductId::new(1),
            name: "Yerba".to_string(),
            description: String::new(),
            price: Decimal::new(12505, 3), // 12.505
            quantity: 4,
            image_url: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let view = ProductView::from(&product);
        assert_eq!(view.price, "12.50");
    }
}
