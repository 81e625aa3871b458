//! Product catalog queries.

use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow};

use playbox_core::ProductId;
use rust_decimal::Decimal;

use super::RepositoryError;
use crate::models::product::Product;

/// Columns of `products` plus the aggregated category names, aliased so the
/// same [`FromRow`] impl works for the catalog and the cart listing.
pub(crate) const PRODUCT_COLUMNS: &str = r"
    p.product_id, p.name, p.price, p.color, p.width_cm, p.height_cm,
    p.weight_g, p.image_url, p.description, p.quantity_in_stock,
    COALESCE(array_agg(c.name ORDER BY c.name) FILTER (WHERE c.name IS NOT NULL), '{}') AS categories
";

/// Joins needed by [`PRODUCT_COLUMNS`].
pub(crate) const CATEGORY_JOINS: &str = r"
    LEFT JOIN products_categories pc ON pc.product_id = p.product_id
    LEFT JOIN categories c ON c.category_id = pc.category_id
";

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("product_id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            color: row.try_get("color")?,
            width_cm: row.try_get("width_cm")?,
            height_cm: row.try_get("height_cm")?,
            weight_g: row.try_get("weight_g")?,
            image_url: row.try_get("image_url")?,
            description: row.try_get("description")?,
            quantity_in_stock: row.try_get("quantity_in_stock")?,
            categories: row.try_get("categories")?,
        })
    }
}

/// Repository for catalog reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product with its category names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p {CATEGORY_JOINS} \
             GROUP BY p.product_id ORDER BY p.product_id"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }
}

/// Take `quantity` units of a product out of stock, flooring at zero.
///
/// Runs as one statement so the row lock is held from read to write. Returns
/// the product's current price, or `None` if no such product exists.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
pub async fn take_stock(
    tx: &mut Transaction<'_, Postgres>,
    product_id: ProductId,
    quantity: i32,
) -> Result<Option<Decimal>, RepositoryError> {
    let price = sqlx::query_scalar(
        r"
        UPDATE products
        SET quantity_in_stock = GREATEST(quantity_in_stock - $1, 0)
        WHERE product_id = $2
        RETURNING price
        ",
    )
    .bind(quantity)
    .bind(product_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(price)
}
