//! Database tests for customer CRUD.
//!
//! These tests require a running `PostgreSQL` database with migrations
//! applied (cargo run -p mercadito-cli -- migrate).

#![allow(clippy::unwrap_used)]

use mercadito_integration_tests::{TestContext, unique_suffix};
use mercadito_server::db::{CustomerRepository, RepositoryError};
use mercadito_server::models::customer::{CreateCustomerInput, UpdateCustomerInput};

fn input(suffix: &str, n: usize) -> CreateCustomerInput {
    CreateCustomerInput {
        name: format!("Cliente {suffix}-{n}"),
        email: format!("cliente-{suffix}-{n}@example.com"),
        phone: "381-000-0000".to_string(),
        address: "Laprida 120".to_string(),
    }
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_update_changes_only_the_targeted_row() {
    let ctx = TestContext::new().await;
    let repo = CustomerRepository::new(&ctx.pool);
    let suffix = unique_suffix();

    let first = repo.create(&input(&suffix, 1)).await.expect("create");
    let second = repo.create(&input(&suffix, 2)).await.expect("create");

    let updated = repo
        .update(
            first.id,
            &UpdateCustomerInput {
                name: first.name.clone(),
                email: first.email.clone(),
                phone: "381-111-1111".to_string(),
                address: "Av. Aconquija 1500".to_string(),
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.phone, "381-111-1111");
    assert_eq!(updated.address, "Av. Aconquija 1500");

    let untouched = repo
        .get(second.id)
        .await
        .expect("get")
        .expect("second customer should still exist");
    assert_eq!(untouched.phone, "381-000-0000");
    assert_eq!(untouched.address, "Laprida 120");
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_update_missing_customer_is_not_found() {
    let ctx = TestContext::new().await;
    let repo = CustomerRepository::new(&ctx.pool);

    let result = repo
        .update(
            mercadito_core::CustomerId::new(i32::MAX),
            &UpdateCustomerInput {
                name: "Nadie".to_string(),
                email: "nadie@example.com".to_string(),
                phone: String::new(),
                address: String::new(),
            },
        )
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_delete_is_idempotent() {
    let ctx = TestContext::new().await;
    let repo = CustomerRepository::new(&ctx.pool);
    let suffix = unique_suffix();

    let customer = repo.create(&input(&suffix, 1)).await.expect("create");

    let first = repo.delete(customer.id).await.expect("delete");
    assert!(first, "first delete removes the row");

    let gone = repo.get(customer.id).await.expect("get");
    assert!(gone.is_none());

    let second = repo.delete(customer.id).await.expect("delete again");
    assert!(!second, "second delete is a no-op");
}
