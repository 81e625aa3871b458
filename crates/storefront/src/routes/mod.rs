//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                   - Liveness probe
//! GET    /ping                     - Database round trip
//!
//! # Accounts
//! POST   /register                 - Create an account (rate limited)
//! POST   /login                    - Exchange credentials for a token (rate limited)
//! POST   /users/password           - Change password (auth)
//! GET    /users/{id}               - Public profile
//!
//! # Catalog
//! GET    /products                 - Every product with its categories
//!
//! # Cart (auth)
//! GET    /cart                     - List lines, creating the cart on first use
//! POST   /cart/items               - Apply a quantity delta to one line
//! DELETE /cart/items/{product_id}  - Drop one line
//!
//! # Cards (auth)
//! GET    /cards                    - List saved cards
//! POST   /cards                    - Save a card
//! DELETE /cards/{id}               - Delete a card
//!
//! # Orders (auth)
//! POST   /checkout                 - Place an order
//! GET    /orders                   - Order history, newest first
//! ```

pub mod auth;
pub mod cards;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the credential routes router (register, login).
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(auth_rate_limiter())
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/password", post(auth::change_password))
        .route("/{id}", get(users::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::upsert_item))
        .route("/items/{product_id}", delete(cart::remove_item))
}

/// Create the card routes router.
pub fn card_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cards::index).post(cards::create))
        .route("/{id}", delete(cards::destroy))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/ping", get(health::ping))
        .merge(credential_routes())
        .nest("/users", user_routes())
        .route("/products", get(products::index))
        .nest("/cart", cart_routes())
        .nest("/cards", card_routes())
        .route("/checkout", post(checkout::checkout))
        .route("/orders", get(orders::index))
}
