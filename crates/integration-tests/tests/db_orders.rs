//! Database tests for order creation.
//!
//! Most of these require a running `PostgreSQL` database with migrations
//! applied (cargo run -p mercadito-cli -- migrate).

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use mercadito_integration_tests::{TestContext, offline_pool, unique_suffix};
use mercadito_server::db::{CustomerRepository, OrderRepository, RepositoryError};
use mercadito_server::models::customer::CreateCustomerInput;
use mercadito_server::models::order::CreateOrderInput;

fn order_input(customer_name: &str, quantity: i32) -> CreateOrderInput {
    CreateOrderInput {
        customer_name: customer_name.to_string(),
        product_name: "Yerba".to_string(),
        quantity,
        delivery_date: NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
    }
}

#[tokio::test]
async fn test_non_positive_quantity_is_rejected_before_any_write() {
    // The repository rejects the quantity before opening a transaction,
    // so no database is needed here.
    let pool = offline_pool();
    let repo = OrderRepository::new(&pool);

    for quantity in [0, -2] {
        let result = repo.create(&order_input("Cliente Test", quantity)).await;
        assert!(
            matches!(result, Err(RepositoryError::Conflict(_))),
            "quantity {quantity} must be rejected, got {result:?}"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_order_for_unknown_customer_is_not_found() {
    let ctx = TestContext::new().await;
    let name = format!("Nadie {}", unique_suffix());

    let result = OrderRepository::new(&ctx.pool)
        .create(&order_input(&name, 1))
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_order_snapshots_the_customer_address() {
    let ctx = TestContext::new().await;
    let suffix = unique_suffix();
    let name = format!("Cliente {suffix}");

    CustomerRepository::new(&ctx.pool)
        .create(&CreateCustomerInput {
            name: name.clone(),
            email: format!("cliente-{suffix}@example.com"),
            phone: "381-000-0000".to_string(),
            address: "Av. Aconquija 1500".to_string(),
        })
        .await
        .expect("customer create should succeed");

    let order = OrderRepository::new(&ctx.pool)
        .create(&order_input(&name, 2))
        .await
        .expect("order create should succeed");

    assert_eq!(order.customer_name, name);
    assert_eq!(order.customer_address, "Av. Aconquija 1500");
    assert_eq!(order.quantity, 2);
}
