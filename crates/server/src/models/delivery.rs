//! Delivery domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use mercadito_core::{DeliveryId, OrderId};

/// A recorded delivery with its geocoded position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    /// Delivery ID (database-assigned).
    pub id: DeliveryId,
    /// Deliverer display name.
    pub deliverer: String,
    /// Delivery address as entered.
    pub address: String,
    /// Scheduled delivery date.
    pub delivery_date: NaiveDate,
    /// Geocoded latitude.
    pub lat: f64,
    /// Geocoded longitude.
    pub lon: f64,
    /// The order this delivery fulfils, when one was selected.
    pub order_id: Option<OrderId>,
    /// When the delivery was recorded.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a delivery.
///
/// `lat`/`lon` come from the geocoder, not from the form.
#[derive(Debug, Clone)]
pub struct CreateDeliveryInput {
    pub deliverer: String,
    pub address: String,
    pub delivery_date: NaiveDate,
    pub lat: f64,
    pub lon: f64,
    pub order_id: Option<OrderId>,
}
