//! Checkout: turn a list of items into an order in one transaction.
//!
//! For each item, in the order given:
//!
//! 1. take the quantity out of stock, flooring at zero,
//! 2. record an order line with the requested quantity and the current price,
//! 3. drop the matching line from the user's cart.
//!
//! Stock is never checked against the request. Ordering more than is on hand
//! leaves stock at zero and the line still records the full quantity.
//!
//! Any failure drops the transaction uncommitted, which rolls it back: no
//! order, no stock change, no cart change. Nothing is retried.

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

use playbox_core::{OrderId, ProductId, UserId};

use crate::db::{RepositoryError, carts, orders, products};

/// Errors from checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request named no items.
    #[error("No items")]
    NoItems,

    /// An item asked for zero or fewer units.
    #[error("quantity must be positive for product {0}")]
    InvalidQuantity(ProductId),

    /// An item names a product that does not exist.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(err))
    }
}

/// One requested item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Reject a request before any transaction is opened.
///
/// # Errors
///
/// Returns `CheckoutError::NoItems` or `CheckoutError::InvalidQuantity`.
pub fn validate_items(items: &[CheckoutItem]) -> Result<(), CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::NoItems);
    }
    if let Some(item) = items.iter().find(|item| item.quantity <= 0) {
        return Err(CheckoutError::InvalidQuantity(item.product_id));
    }
    Ok(())
}

/// Checkout service.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order for `items` on behalf of `user_id`.
    ///
    /// Not idempotent: the same items twice make two orders.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NoItems` or `CheckoutError::InvalidQuantity`
    /// without touching the database.
    /// Returns `CheckoutError::ProductNotFound` or `CheckoutError::Repository`
    /// after rolling the transaction back.
    #[tracing::instrument(skip(self, items), fields(user_id = %user_id, items = items.len(), order_id = tracing::field::Empty))]
    pub async fn checkout(
        &self,
        user_id: UserId,
        items: &[CheckoutItem],
    ) -> Result<OrderId, CheckoutError> {
        validate_items(items)?;

        let mut tx = self.pool.begin().await?;

        let order_id = orders::insert_order(&mut tx, user_id).await?;
        tracing::Span::current().record("order_id", tracing::field::display(order_id));

        for item in items {
            let unit_price = products::take_stock(&mut tx, item.product_id, item.quantity)
                .await?
                .ok_or(CheckoutError::ProductNotFound(item.product_id))?;

            orders::insert_line(&mut tx, order_id, item.product_id, item.quantity, unit_price)
                .await?;

            carts::clear_line(&mut tx, user_id, item.product_id).await?;
        }

        tx.commit().await?;

        tracing::info!(order_id = %order_id, "Order placed");
        Ok(order_id)
    }
}
