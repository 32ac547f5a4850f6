//! Deliverer and seller models.
//!
//! These are selector data for the delivery and sales screens; they are
//! provisioned via the CLI `seed` command rather than a screen of their
//! own.

use serde::{Deserialize, Serialize};

use mercadito_core::{DelivererId, SellerId};

/// A deliverer who can be assigned deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deliverer {
    pub id: DelivererId,
    pub name: String,
}

/// A seller who can register sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
}
