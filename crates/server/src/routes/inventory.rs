//! Inventory screen: warehouse items keyed by caller-supplied labels.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use tracing::instrument;

use crate::{
    db::{InventoryRepository, RepositoryError},
    filters,
    models::inventory_item::{CreateInventoryItemInput, InventoryItem, UpdateInventoryItemInput},
    state::AppState,
};

use super::customers::FlashQuery;

/// Build the inventory sub-router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(index).post(create))
        .route("/inventory/{id}", post(update))
        .route("/inventory/{id}/delete", post(delete))
}

/// Inventory item view for templates.
#[derive(Debug, Clone)]
pub struct InventoryItemView {
    pub id: String,
    pub product_name: String,
    pub quantity: i32,
}

impl From<&InventoryItem> for InventoryItemView {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id.clone(),
            product_name: item.product_name.clone(),
            quantity: item.quantity,
        }
    }
}

/// Inventory screen template.
#[derive(Template)]
#[template(path = "inventory/index.html")]
pub struct InventoryIndexTemplate {
    pub current_path: String,
    pub items: Vec<InventoryItemView>,
    pub message: Option<String>,
    pub error_message: Option<String>,
}

fn flash_messages(query: &FlashQuery) -> (Option<String>, Option<String>) {
    let message = query.success.as_deref().map(|token| match token {
        "created" => "Artículo agregado.".to_string(),
        "updated" => "Artículo actualizado.".to_string(),
        "deleted" => "Artículo eliminado.".to_string(),
        other => other.to_string(),
    });
    let error_message = query.error.as_deref().map(|token| match token {
        "not_found" => "El artículo no existe.".to_string(),
        "duplicate" => "Ya existe un artículo con ese código.".to_string(),
        "save_failed" => "No se pudo guardar el artículo.".to_string(),
        other => other.to_string(),
    });
    (message, error_message)
}

/// Inventory screen handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<FlashQuery>) -> Html<String> {
    let repo = InventoryRepository::new(state.pool());
    let items = match repo.list().await {
        Ok(items) => items.iter().map(InventoryItemView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to list inventory: {e}");
            vec![]
        }
    };

    let (message, error_message) = flash_messages(&query);
    let template = InventoryIndexTemplate {
        current_path: "/inventory".to_string(),
        items,
        message,
        error_message,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Create an inventory item from the screen form.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Form(input): Form<CreateInventoryItemInput>,
) -> Redirect {
    let repo = InventoryRepository::new(state.pool());
    match repo.create(&input).await {
        Ok(item) => {
            tracing::info!(item_id = %item.id, "Inventory item created");
            Redirect::to("/inventory?success=created")
        }
        Err(RepositoryError::Conflict(_)) => Redirect::to("/inventory?error=duplicate"),
        Err(e) => {
            tracing::error!("Failed to create inventory item: {e}");
            Redirect::to("/inventory?error=save_failed")
        }
    }
}

/// Update an inventory item's mutable fields.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<UpdateInventoryItemInput>,
) -> Redirect {
    let repo = InventoryRepository::new(state.pool());
    match repo.update(&id, &input).await {
        Ok(_) => Redirect::to("/inventory?success=updated"),
        Err(RepositoryError::NotFound) => Redirect::to("/inventory?error=not_found"),
        Err(e) => {
            tracing::error!("Failed to update inventory item {id}: {e}");
            Redirect::to("/inventory?error=save_failed")
        }
    }
}

/// Delete an inventory item. Deleting a missing item is a no-op.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    let repo = InventoryRepository::new(state.pool());
    match repo.delete(&id).await {
        Ok(_) => Redirect::to("/inventory?success=deleted"),
        Err(e) => {
            tracing::error!("Failed to delete inventory item {id}: {e}");
            Redirect::to("/inventory?error=save_failed")
        }
    }
}
