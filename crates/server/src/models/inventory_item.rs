//! Inventory item domain models.
//!
//! Inventory rows use caller-supplied string IDs (warehouse labels), not
//! the sequential counters used elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A warehouse inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Caller-supplied identifier (e.g. a shelf or bin label).
    pub id: String,
    /// Product name. Not a foreign key into `products`.
    pub product_name: String,
    /// Units on hand.
    pub quantity: i32,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new inventory item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInventoryItemInput {
    pub id: String,
    pub product_name: String,
    pub quantity: i32,
}

/// Input for updating an inventory item's mutable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInventoryItemInput {
    pub product_name: String,
    pub quantity: i32,
}
