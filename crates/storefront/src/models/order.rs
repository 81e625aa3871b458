//! Order types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use playbox_core::{OrderId, OrderStatus, ProductId, UserId};

/// One line of a placed order. `price` is the unit price at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i32,
    pub product_name: String,
    pub price: Decimal,
}

/// An order as listed by `GET /orders`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub order_ts: DateTime<Utc>,
    /// Number of order lines.
    pub total_items: usize,
    /// Sum of `price * quantity` over all lines.
    pub total_amount: Decimal,
    pub user_id: UserId,
    pub items: Vec<OrderLine>,
}

impl OrderSummary {
    /// Build a summary, deriving the totals from `items`.
    #[must_use]
    pub fn new(
        order_id: OrderId,
        user_id: UserId,
        status: OrderStatus,
        order_ts: DateTime<Utc>,
        items: Vec<OrderLine>,
    ) -> Self {
        let total_amount = items
            .iter()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum();
        Self {
            order_id,
            status,
            order_ts,
            total_items: items.len(),
            total_amount,
            user_id,
            items,
        }
    }
}
