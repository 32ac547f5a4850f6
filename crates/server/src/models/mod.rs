//! Domain models for the business-management screens.
//!
//! Each module holds the entity struct plus the create/update input types
//! consumed by its repository. Models use newtype IDs from
//! `mercadito-core` so references between entities cannot be mixed up.

pub mod customer;
pub mod delivery;
pub mod inventory_item;
pub mod order;
pub mod product;
pub mod sale;
pub mod staff;

pub use customer::{CreateCustomerInput, Customer, UpdateCustomerInput};
pub use delivery::{CreateDeliveryInput, Delivery};
pub use inventory_item::{CreateInventoryItemInput, InventoryItem, UpdateInventoryItemInput};
pub use order::{CreateOrderInput, Order};
pub use product::{CreateProductInput, Product, UpdateProductInput};
pub use sale::{RecordSaleInput, Sale};
pub use staff::{Deliverer, Seller};
