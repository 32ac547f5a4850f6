//! Database tests for sequential ID allocation.
//!
//! These tests require a running `PostgreSQL` database with migrations
//! applied (cargo run -p mercadito-cli -- migrate).

#![allow(clippy::unwrap_used)]

use mercadito_integration_tests::{TestContext, unique_suffix};
use mercadito_server::db::{CustomerRepository, RepositoryError, counters};
use mercadito_server::models::customer::CreateCustomerInput;

fn customer_input(suffix: &str, n: usize) -> CreateCustomerInput {
    CreateCustomerInput {
        name: format!("Cliente {suffix}-{n}"),
        email: format!("cliente-{suffix}-{n}@example.com"),
        phone: "381-000-0000".to_string(),
        address: "Laprida 120".to_string(),
    }
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_serial_allocations_are_strictly_increasing_and_gap_free() {
    let ctx = TestContext::new().await;

    // The UPDATE's row lock keeps the counter ours until commit, so the
    // five allocations are consecutive even with other tests running.
    let mut tx = ctx.pool.begin().await.expect("begin transaction");

    let mut ids = Vec::new();
    for _ in 0..5 {
        let id = counters::next_id(&mut tx, counters::CUSTOMERS)
            .await
            .expect("allocation should succeed");
        ids.push(id);
    }

    for pair in ids.windows(2) {
        assert_eq!(
            pair[1],
            pair[0] + 1,
            "serial allocations must be gap-free, got {ids:?}"
        );
    }

    let position = counters::current(&mut tx, counters::CUSTOMERS)
        .await
        .expect("counter read should succeed")
        .expect("customers counter should be provisioned");
    assert_eq!(
        position,
        *ids.last().unwrap(),
        "counter must rest on the last allocated ID"
    );

    // Roll back so the unconsumed IDs are returned to the counter.
    tx.rollback().await.expect("rollback");
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_concurrent_allocations_return_distinct_ids() {
    let ctx = TestContext::new().await;
    let suffix = unique_suffix();

    let mut handles = Vec::new();
    for n in 0..10 {
        let pool = ctx.pool.clone();
        let input = customer_input(&suffix, n);
        handles.push(tokio::spawn(async move {
            CustomerRepository::new(&pool)
                .create(&input)
                .await
                .expect("concurrent create should succeed")
                .id
                .as_i32()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.expect("task should not panic"));
    }

    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(
        deduped.len(),
        ids.len(),
        "two concurrent allocations observed the same ID: {ids:?}"
    );
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_missing_counter_is_an_error() {
    let ctx = TestContext::new().await;
    let mut conn = ctx.pool.acquire().await.expect("acquire connection");

    let result = counters::next_id(&mut conn, "no_such_counter").await;
    assert!(
        matches!(result, Err(RepositoryError::CounterMissing(_))),
        "allocation against an unprovisioned counter must fail"
    );
}
