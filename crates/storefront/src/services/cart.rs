//! Cart mutation.
//!
//! `upsert` applies a signed delta to one cart line:
//!
//! - `delta >= 0` merges: insert the line or add to its quantity.
//! - `delta < 0` decrements an existing line, flooring at zero. Against an
//!   absent line it does nothing; no zero-quantity line is created.
//!
//! Both paths are a single statement, so concurrent deltas to the same line
//! are applied one after another by the line's row lock.

use sqlx::PgPool;
use thiserror::Error;

use playbox_core::{ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::models::cart::CartItem;

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Removal from a user who has never had a cart.
    #[error("Cart not found")]
    CartNotFound,

    /// The product does not exist.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// How a delta is applied to a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMutation {
    /// Insert the line or add this much to it.
    Merge(i32),
    /// Lower an existing line by this much (positive), not below zero.
    Decrement(i32),
}

impl CartMutation {
    /// Choose the mutation for a signed delta.
    #[must_use]
    pub const fn from_delta(delta: i32) -> Self {
        if delta < 0 {
            // i32::MIN has no positive counterpart; saturate.
            Self::Decrement(delta.saturating_neg())
        } else {
            Self::Merge(delta)
        }
    }
}

/// Cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
        }
    }

    /// List the user's cart, creating it if this is the first access.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if a query fails.
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list(&self, user_id: UserId) -> Result<Vec<CartItem>, CartError> {
        let cart = self.carts.get_or_create(user_id).await?;
        Ok(self.carts.items(cart.id).await?)
    }

    /// Apply `delta` to the user's line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` when merging an unknown product.
    /// Returns `CartError::Repository` if a query fails.
    #[tracing::instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn upsert(
        &self,
        user_id: UserId,
        product_id: ProductId,
        delta: i32,
    ) -> Result<(), CartError> {
        let cart = self.carts.get_or_create(user_id).await?;

        match CartMutation::from_delta(delta) {
            CartMutation::Merge(quantity) => {
                self.carts
                    .merge_line(cart.id, product_id, quantity)
                    .await
                    .map_err(|e| match e {
                        RepositoryError::NotFound => CartError::ProductNotFound(product_id),
                        other => CartError::Repository(other),
                    })?;
            }
            CartMutation::Decrement(amount) => {
                let touched = self.carts.decrement_line(cart.id, product_id, amount).await?;
                if touched == 0 {
                    tracing::debug!("No line to decrement");
                }
            }
        }

        Ok(())
    }

    /// Delete the user's line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the user has no cart.
    /// Returns `CartError::Repository` if a query fails.
    #[tracing::instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn remove(&self, user_id: UserId, product_id: ProductId) -> Result<(), CartError> {
        let cart = self
            .carts
            .find(user_id)
            .await?
            .ok_or(CartError::CartNotFound)?;

        self.carts.remove_line(cart.id, product_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_delta_merges() {
        assert_eq!(CartMutation::from_delta(3), CartMutation::Merge(3));
        assert_eq!(CartMutation::from_delta(0), CartMutation::Merge(0));
    }

    #[test]
    fn test_negative_delta_decrements() {
        assert_eq!(CartMutation::from_delta(-1), CartMutation::Decrement(1));
        assert_eq!(CartMutation::from_delta(-5), CartMutation::Decrement(5));
    }

    #[test]
    fn test_min_delta_saturates() {
        assert_eq!(
            CartMutation::from_delta(i32::MIN),
            CartMutation::Decrement(i32::MAX)
        );
    }

    #[test]
    fn test_cart_error_messages() {
        assert_eq!(CartError::CartNotFound.to_string(), "Cart not found");
        assert_eq!(
            CartError::ProductNotFound(ProductId::new(9)).to_string(),
            "product 9 not found"
        );
    }
}
