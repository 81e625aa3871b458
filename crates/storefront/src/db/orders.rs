//! Order repository.
//!
//! Writes happen only inside a checkout transaction; reads build the order
//! history for one user.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Row, Transaction};

use playbox_core::{OrderId, OrderStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::order::{OrderLine, OrderSummary};

/// Create an order with status `new` for a user.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_order(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
) -> Result<OrderId, RepositoryError> {
    let id = sqlx::query_scalar(
        "INSERT INTO orders (user_id, status) VALUES ($1, $2) RETURNING order_id",
    )
    .bind(user_id)
    .bind(OrderStatus::New)
    .fetch_one(&mut **tx)
    .await?;

    Ok(id)
}

/// Record one order line with the price paid per unit.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_line(
    tx: &mut Transaction<'_, Postgres>,
    order_id: OrderId,
    product_id: ProductId,
    quantity: i32,
    unit_price: Decimal,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO order_items (order_id, product_id, quantity, unit_price)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .bind(unit_price)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Read-side order queries.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's orders, newest first, each with its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<OrderSummary>, RepositoryError> {
        let orders = sqlx::query(
            r"
            SELECT order_id, status, order_ts
            FROM orders
            WHERE user_id = $1
            ORDER BY order_ts DESC, order_id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let line_rows = sqlx::query(
            r"
            SELECT oi.order_id, oi.product_id, oi.quantity, oi.unit_price, p.name
            FROM order_items oi
            JOIN orders o ON o.order_id = oi.order_id
            JOIN products p ON p.product_id = oi.product_id
            WHERE o.user_id = $1
            ORDER BY oi.order_item_id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut lines: HashMap<OrderId, Vec<OrderLine>> = HashMap::new();
        for row in line_rows {
            let order_id: OrderId = row.try_get("order_id")?;
            lines.entry(order_id).or_default().push(OrderLine {
                product_id: row.try_get("product_id")?,
                quantity: row.try_get("quantity")?,
                product_name: row.try_get("name")?,
                price: row.try_get("unit_price")?,
            });
        }

        orders
            .into_iter()
            .map(|row| -> Result<OrderSummary, RepositoryError> {
                let order_id: OrderId = row.try_get("order_id")?;
                let status: OrderStatus = row.try_get("status")?;
                let order_ts: DateTime<Utc> = row.try_get("order_ts")?;
                let items = lines.remove(&order_id).unwrap_or_default();
                Ok(OrderSummary::new(order_id, user_id, status, order_ts, items))
            })
            .collect()
    }
}
