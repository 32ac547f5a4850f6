//! Product domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mercadito_core::ProductId;

/// A product record.
///
/// `quantity` is the sellable stock and is decremented by sale
/// registration; it is distinct from the warehouse counts tracked on the
/// inventory screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Sequential product ID, allocated from the `products` counter.
    pub id: ProductId,
    /// Display name. Orders and sales reference products by this name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock. Never negative.
    pub quantity: i32,
    /// Optional product image URL.
    pub image_url: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub image_url: String,
}

/// Input for updating a product's mutable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub image_url: String,
}
