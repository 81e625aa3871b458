//! Accounts, profiles and saved cards against a real database.
//!
//! These tests require a `PostgreSQL` database in `PLAYBOX_TEST_DATABASE_URL`.
//!
//! Run with: cargo test -p playbox-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use playbox_integration_tests::{TEST_PASSWORD, TestApp};

// ============================================================================
// Registration & Login
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;

    let resp = app
        .post("/register")
        .json(&json!({
            "first_name": "Other",
            "last_name": "Person",
            "email": user.email,
            "password": "another1",
        }))
        .send()
        .await
        .expect("register");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_wrong_password_rejected() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;

    let resp = app
        .post("/login")
        .json(&json!({ "email": user.email, "password": "wrong-one" }))
        .send()
        .await
        .expect("login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_change_password() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;

    let resp = app
        .post("/users/password")
        .bearer_auth(&user.token)
        .json(&json!({ "old_password": TEST_PASSWORD, "new_password": "brand-new-pw" }))
        .send()
        .await
        .expect("change password");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .post("/login")
        .json(&json!({ "email": user.email, "password": "brand-new-pw" }))
        .send()
        .await
        .expect("login");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_profile_hides_password_hash() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;

    let resp = app
        .get(&format!("/users/{}", user.user_id))
        .send()
        .await
        .expect("profile");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("profile body");
    assert_eq!(body["email"], user.email);
    assert!(body.get("password_hash").is_none());

    let resp = app
        .get(&format!("/users/{}", i32::MAX))
        .send()
        .await
        .expect("profile");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Cards
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_card_lifecycle() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;

    let resp = app
        .post("/cards")
        .bearer_auth(&user.token)
        .json(&json!({
            "cardholder_name": "ANNA BERG",
            "card_number": "4111 1111 1111 1111",
            "exp_month": 9,
            "exp_year": 29,
        }))
        .send()
        .await
        .expect("create card");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let card: Value = resp.json().await.expect("card body");
    let card_id = card["card_id"].as_i64().expect("card_id");

    let resp = app
        .get("/cards")
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("list cards");
    let cards: Value = resp.json().await.expect("cards body");
    assert_eq!(cards.as_array().map(Vec::len), Some(1));

    // Another user cannot delete it.
    let stranger = app.register_and_login().await;
    let resp = app
        .delete(&format!("/cards/{card_id}"))
        .bearer_auth(&stranger.token)
        .send()
        .await
        .expect("delete card");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .delete(&format!("/cards/{card_id}"))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("delete card");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (PLAYBOX_TEST_DATABASE_URL)"]
async fn test_invalid_card_rejected() {
    let app = TestApp::with_database().await;
    let user = app.register_and_login().await;

    let resp = app
        .post("/cards")
        .bearer_auth(&user.token)
        .json(&json!({
            "cardholder_name": "ANNA BERG",
            "card_number": "4111111111111111",
            "exp_month": 13,
            "exp_year": 29,
        }))
        .send()
        .await
        .expect("create card");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
