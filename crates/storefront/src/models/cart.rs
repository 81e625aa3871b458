//! Cart types.

use serde::Serialize;

use playbox_core::{CartId, CartItemId, UserId};

use super::product::Product;

/// A user's cart. Exactly one per user, created on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
}

/// One cart line joined with the current product details.
#[derive(Debug, Clone, Serialize)]
pub struct CartItem {
    pub cart_item_id: CartItemId,
    pub product: Product,
    pub quantity: i32,
}
