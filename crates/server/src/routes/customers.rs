//! Customers screen: create/edit/delete customers and list them.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use mercadito_core::CustomerId;

use crate::{
    db::{CustomerRepository, RepositoryError},
    filters,
    models::customer::{CreateCustomerInput, Customer, UpdateCustomerInput},
    state::AppState,
};

/// Build the customers sub-router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(index).post(create))
        .route("/customers/{id}", post(update))
        .route("/customers/{id}/delete", post(delete))
}

/// Outcome tokens from a redirect.
#[derive(Debug, Deserialize)]
pub struct FlashQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Customer view for templates.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.as_i32(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
        }
    }
}

/// Customers screen template.
#[derive(Template)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub current_path: String,
    pub customers: Vec<CustomerView>,
    pub message: Option<String>,
    pub error_message: Option<String>,
}

fn flash_messages(query: &FlashQuery) -> (Option<String>, Option<String>) {
    let message = query.success.as_deref().map(|token| match token {
        "created" => "Cliente creado.".to_string(),
        "updated" => "Cliente actualizado.".to_string(),
        "deleted" => "Cliente eliminado.".to_string(),
        other => other.to_string(),
    });
    let error_message = query.error.as_deref().map(|token| match token {
        "not_found" => "El cliente no existe.".to_string(),
        "save_failed" => "No se pudo guardar el cliente.".to_string(),
        other => other.to_string(),
    });
    (message, error_message)
}

/// Customers screen handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<FlashQuery>) -> Html<String> {
    let repo = CustomerRepository::new(state.pool());
    let customers = match repo.list().await {
        Ok(customers) => customers.iter().map(CustomerView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to list customers: {e}");
            vec![]
        }
    };

    let (message, error_message) = flash_messages(&query);
    let template = CustomersIndexTemplate {
        current_path: "/customers".to_string(),
        customers,
        message,
        error_message,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Create a customer from the screen form.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Form(input): Form<CreateCustomerInput>,
) -> Redirect {
    let repo = CustomerRepository::new(state.pool());
    match repo.create(&input).await {
        Ok(customer) => {
            tracing::info!(customer_id = customer.id.as_i32(), "Customer created");
            Redirect::to("/customers?success=created")
        }
        Err(e) => {
            tracing::error!("Failed to create customer: {e}");
            Redirect::to("/customers?error=save_failed")
        }
    }
}

/// Update a customer's mutable fields.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(input): Form<UpdateCustomerInput>,
) -> Redirect {
    let repo = CustomerRepository::new(state.pool());
    match repo.update(CustomerId::new(id), &input).await {
        Ok(_) => Redirect::to("/customers?success=updated"),
        Err(RepositoryError::NotFound) => Redirect::to("/customers?error=not_found"),
        Err(e) => {
            tracing::error!("Failed to update customer {id}: {e}");
            Redirect::to("/customers?error=save_failed")
        }
    }
}

/// Delete a customer. Deleting a missing customer is a no-op.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Redirect {
    let repo = CustomerRepository::new(state.pool());
    match repo.delete(CustomerId::new(id)).await {
        Ok(_) => Redirect::to("/customers?success=deleted"),
        Err(e) => {
            tracing::error!("Failed to delete customer {id}: {e}");
            Redirect::to("/customers?error=save_failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_messages_known_tokens() {
        let query = FlashQuery {
            success: Some("created".to_string()),
            error: None,
        };
        let (message, error_message) = flash_messages(&query);
        assert_eq!(message.as_deref(), Some("Cliente creado."));
        assert!(error_message.is_none());
    }

    #[test]
    fn test_flash_messages_empty() {
        let query = FlashQuery {
            success: None,
            error: None,
        };
        let (message, error_message) = flash_messages(&query);
        assert!(message.is_none());
        assert!(error_message.is_none());
    }
}
