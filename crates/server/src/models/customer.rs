//! Customer domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mercadito_core::CustomerId;

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Sequential customer ID, allocated from the `customers` counter.
    pub id: CustomerId,
    /// Display name. Orders and sales reference customers by this name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Street address, used to prefill orders and deliveries.
    pub address: String,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Input for updating a customer's mutable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomerInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}
