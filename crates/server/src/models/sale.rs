//! Sale domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mercadito_core::SaleId;

/// A recorded sale.
///
/// The unit price and total are captured at sale time from the product
/// row, so later price changes do not rewrite sale history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Sequential sale ID, allocated from the `sales` counter.
    pub id: SaleId,
    /// Customer display name.
    pub customer: String,
    /// Product display name.
    pub product: String,
    /// Units sold.
    pub quantity: i32,
    /// Seller display name.
    pub seller: String,
    /// Date of sale.
    pub sale_date: NaiveDate,
    /// Unit price at sale time.
    pub unit_price: Decimal,
    /// `unit_price * quantity`.
    pub total: Decimal,
    /// When the sale was recorded.
    pub created_at: DateTime<Utc>,
}

/// Input for registering a sale.
///
/// The unit price is read from the product inside the registration
/// transaction; callers only name the product.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSaleInput {
    pub customer: String,
    pub product: String,
    pub quantity: i32,
    pub seller: String,
}
