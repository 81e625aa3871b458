//! Cart mutation against a real database.
//!
//! These tests require a `PostgreSQL` database in `PLAYBOX_TEST_DATABASE_URL`.
//!
//! Run with: cargo test -p playbox-integration-tests -- --ignored

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

use playbox_integration_tests::TestApp;

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_new_user_has_empty_cart() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;

    assert!(app.cart_lines(&user).await.is_empty());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_deltas_accumulate() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;
    let product = app.insert_product(Decimal::new(700, 2), 50).await;

    for delta in [3, -1, 2] {
        app.add_to_cart(&user, product, delta).await;
    }

    assert_eq!(
        app.cart_lines(&user).await,
        vec![(i64::from(product.as_i32()), 4)]
    );
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_negative_delta_on_absent_line_is_noop() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;
    let product = app.insert_product(Decimal::new(700, 2), 50).await;

    app.add_to_cart(&user, product, -5).await;

    assert!(app.cart_lines(&user).await.is_empty());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_decrement_floors_at_zero() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;
    let product = app.insert_product(Decimal::new(700, 2), 50).await;

    app.add_to_cart(&user, product, 2).await;
    app.add_to_cart(&user, product, -5).await;

    assert_eq!(
        app.cart_lines(&user).await,
        vec![(i64::from(product.as_i32()), 0)]
    );
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_unknown_product_is_not_found() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;

    let resp = app
        .post("/cart/items")
        .bearer_auth(&user.token)
        .json(&json!({ "product_id": i32::MAX, "quantity": 1 }))
        .send()
        .await
        .expect("cart request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_remove_line() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;
    let product = app.insert_product(Decimal::new(700, 2), 50).await;
    app.add_to_cart(&user, product, 1).await;

    let resp = app
        .delete(&format!("/cart/items/{product}"))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("delete request");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert!(app.cart_lines(&user).await.is_empty());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_remove_without_cart_is_not_found() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;
    let product = app.insert_product(Decimal::new(700, 2), 50).await;

    // The cart is only created by GET /cart or POST /cart/items.
    let resp = app
        .delete(&format!("/cart/items/{product}"))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("delete request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.text().await.expect("body"), "Cart not found");
}
