//! Order domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use mercadito_core::OrderId;

/// An order record.
///
/// Orders reference the customer and product by display name rather than
/// by ID; renaming a customer or product does not rewrite historical
/// orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Sequential order ID, allocated from the `orders` counter.
    pub id: OrderId,
    /// Customer display name.
    pub customer_name: String,
    /// Product display name.
    pub product_name: String,
    /// Units ordered.
    pub quantity: i32,
    /// Requested delivery date.
    pub delivery_date: NaiveDate,
    /// Customer address, resolved from the customer at creation time.
    pub customer_address: String,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new order.
///
/// The customer's address is resolved server-side from `customer_name`;
/// callers do not supply it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    pub customer_name: String,
    pub product_name: String,
    pub quantity: i32,
    pub delivery_date: NaiveDate,
}
