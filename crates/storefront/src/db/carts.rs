//! Cart repository.
//!
//! A cart is keyed by `user_id` (unique) and holds at most one line per
//! product (`UNIQUE (cart_id, product_id)`). Line quantities never go below
//! zero; the arithmetic for that lives in the SQL so concurrent updates to the
//! same line serialize on its row lock.

use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow};

use playbox_core::{CartId, ProductId, UserId};

use super::RepositoryError;
use super::products::{CATEGORY_JOINS, PRODUCT_COLUMNS};
use crate::models::cart::{Cart, CartItem};
use crate::models::product::Product;

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            cart_item_id: row.try_get("cart_item_id")?,
            product: Product::from_row(row)?,
            quantity: row.try_get("quantity")?,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's cart without creating it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let id: Option<CartId> = sqlx::query_scalar("SELECT cart_id FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(id.map(|id| Cart { id, user_id }))
    }

    /// Get a user's cart, creating an empty one on first use.
    ///
    /// The follow-up `SELECT` also sees a cart inserted concurrently.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        sqlx::query("INSERT INTO carts (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        self.find(user_id).await?.ok_or(RepositoryError::NotFound)
    }

    /// List a cart's lines joined with product details.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let sql = format!(
            "SELECT ci.cart_item_id, ci.quantity, {PRODUCT_COLUMNS} \
             FROM cart_items ci \
             JOIN products p ON p.product_id = ci.product_id \
             {CATEGORY_JOINS} \
             WHERE ci.cart_id = $1 \
             GROUP BY ci.cart_item_id, ci.quantity, p.product_id \
             ORDER BY ci.cart_item_id"
        );
        let items = sqlx::query_as::<_, CartItem>(&sql)
            .bind(cart_id)
            .fetch_all(self.pool)
            .await?;

        Ok(items)
    }

    /// Add `quantity` (non-negative) to a line, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn merge_line(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(self.pool)
        .await
        .map_err(not_found_on_foreign_key)?;

        Ok(())
    }

    /// Lower an existing line by `amount` (positive), flooring at zero.
    ///
    /// Returns the number of lines touched: 0 when the line does not exist,
    /// in which case nothing is created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn decrement_line(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        amount: i32,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE cart_items
            SET quantity = GREATEST(quantity - $1, 0)
            WHERE cart_id = $2 AND product_id = $3
            ",
        )
        .bind(amount)
        .bind(cart_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a line outright. Deleting an absent line is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_line(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Delete the line for `product_id` from `user_id`'s cart, inside a checkout.
///
/// A user without a cart, or a cart without that line, is a no-op.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
pub async fn clear_line(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    product_id: ProductId,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        DELETE FROM cart_items
        WHERE cart_id = (SELECT cart_id FROM carts WHERE user_id = $1)
          AND product_id = $2
        ",
    )
    .bind(user_id)
    .bind(product_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

fn not_found_on_foreign_key(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::NotFound;
    }
    RepositoryError::Database(err)
}
