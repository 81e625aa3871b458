//! Catalog types.

use rust_decimal::Decimal;
use serde::Serialize;

use playbox_core::ProductId;

/// A product with the names of every category it belongs to.
///
/// `price` serializes as a decimal string (`"19.99"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub color: String,
    pub width_cm: i32,
    pub height_cm: i32,
    pub weight_g: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity_in_stock: i32,
    pub categories: Vec<String>,
}
