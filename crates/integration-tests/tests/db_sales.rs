//! Database tests for stock-aware sale registration.
//!
//! These tests require a running `PostgreSQL` database with migrations
//! applied (cargo run -p mercadito-cli -- migrate).

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use mercadito_core::ProductId;
use mercadito_integration_tests::{TestContext, offline_pool, unique_suffix};
use mercadito_server::db::{ProductRepository, RepositoryError, SaleRepository};
use mercadito_server::models::product::CreateProductInput;
use mercadito_server::models::sale::RecordSaleInput;

async fn create_product(ctx: &TestContext, name: &str, price: Decimal, stock: i32) -> ProductId {
    ProductRepository::new(&ctx.pool)
        .create(&CreateProductInput {
            name: name.to_string(),
            description: String::new(),
            price,
            quantity: stock,
            image_url: String::new(),
        })
        .await
        .expect("product create should succeed")
        .id
}

fn sale_input(product: &str, quantity: i32) -> RecordSaleInput {
    RecordSaleInput {
        customer: "Cliente Test".to_string(),
        product: product.to_string(),
        quantity,
        seller: "Ana".to_string(),
    }
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_sale_within_stock_decrements_and_records_total() {
    let ctx = TestContext::new().await;
    let name = format!("Yerba {}", unique_suffix());
    let price = Decimal::new(1250, 2); // 12.50
    let id = create_product(&ctx, &name, price, 10).await;

    let sale = SaleRepository::new(&ctx.pool)
        .record(&sale_input(&name, 3))
        .await
        .expect("sale should succeed");

    assert_eq!(sale.quantity, 3);
    assert_eq!(sale.unit_price, price);
    assert_eq!(sale.total, price * Decimal::from(3));

    let product = ProductRepository::new(&ctx.pool)
        .get(id)
        .await
        .expect("get should succeed")
        .expect("product should exist");
    assert_eq!(product.quantity, 7, "stock 10 minus 3 sold");
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_sale_beyond_stock_is_rejected_and_writes_nothing() {
    let ctx = TestContext::new().await;
    let name = format!("Harina {}", unique_suffix());
    let id = create_product(&ctx, &name, Decimal::new(800, 2), 2).await;

    let sale_repo = SaleRepository::new(&ctx.pool);
    let before = sale_repo.count().await.expect("count should succeed");

    let result = sale_repo.record(&sale_input(&name, 5)).await;
    match result {
        Err(RepositoryError::InsufficientStock { available }) => assert_eq!(available, 2),
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    let product = ProductRepository::new(&ctx.pool)
        .get(id)
        .await
        .expect("get should succeed")
        .expect("product should exist");
    assert_eq!(product.quantity, 2, "rejected sale must not touch stock");

    let after = sale_repo.count().await.expect("count should succeed");
    assert_eq!(after, before, "rejected sale must not add a row");
}

#[tokio::test]
async fn test_non_positive_quantity_is_rejected_before_any_write() {
    // A negative quantity would satisfy the stock guard and turn the
    // decrement into an increment; the repository rejects it before
    // opening a transaction, so no database is needed here.
    let pool = offline_pool();
    let repo = SaleRepository::new(&pool);

    for quantity in [0, -3] {
        let result = repo.record(&sale_input("Yerba", quantity)).await;
        assert!(
            matches!(result, Err(RepositoryError::Conflict(_))),
            "quantity {quantity} must be rejected, got {result:?}"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_sale_of_unknown_product_is_not_found() {
    let ctx = TestContext::new().await;
    let name = format!("Fantasma {}", unique_suffix());

    let result = SaleRepository::new(&ctx.pool)
        .record(&sale_input(&name, 1))
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_concurrent_sales_never_oversell() {
    let ctx = TestContext::new().await;
    let name = format!("Azucar {}", unique_suffix());
    let id = create_product(&ctx, &name, Decimal::new(500, 2), 5).await;

    // Ten concurrent sales of 1 unit against 5 in stock: exactly five
    // succeed, stock ends at zero.
    let mut handles = Vec::new();
    for _ in 0..10 {
        let pool = ctx.pool.clone();
        let input = sale_input(&name, 1);
        handles.push(tokio::spawn(async move {
            SaleRepository::new(&pool).record(&input).await
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.expect("task should not panic").is_ok() {
            succeeded += 1;
        }
    }
    assert_eq!(succeeded, 5);

    let product = ProductRepository::new(&ctx.pool)
        .get(id)
        .await
        .expect("get should succeed")
        .expect("product should exist");
    assert_eq!(product.quantity, 0);
}
