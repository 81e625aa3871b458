//! Demo catalog seeding.
//!
//! Inserts a handful of categories and products so a fresh database has
//! something to browse and check out. Rows are matched by name, so running the
//! command twice inserts nothing the second time.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::migrate::MigrationError;

struct DemoProduct {
    name: &'static str,
    price_cents: i64,
    color: &'static str,
    width_cm: i32,
    height_cm: i32,
    weight_g: i32,
    description: &'static str,
    quantity_in_stock: i32,
    categories: &'static [&'static str],
}

const CATEGORIES: &[&str] = &["Board Games", "Puzzles", "Outdoor", "Building Sets"];

const PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        name: "Harbor Traders",
        price_cents: 3999,
        color: "blue",
        width_cm: 30,
        height_cm: 8,
        weight_g: 1200,
        description: "Trading game for 2-5 players.",
        quantity_in_stock: 25,
        categories: &["Board Games"],
    },
    DemoProduct {
        name: "Night Sky 1000",
        price_cents: 1850,
        color: "black",
        width_cm: 35,
        height_cm: 5,
        weight_g: 650,
        description: "1000-piece star map puzzle.",
        quantity_in_stock: 40,
        categories: &["Puzzles"],
    },
    DemoProduct {
        name: "Foam Flyer",
        price_cents: 1299,
        color: "orange",
        width_cm: 25,
        height_cm: 3,
        weight_g: 150,
        description: "Soft throwing disc.",
        quantity_in_stock: 60,
        categories: &["Outdoor"],
    },
    DemoProduct {
        name: "Lighthouse Kit",
        price_cents: 5400,
        color: "white",
        width_cm: 38,
        height_cm: 26,
        weight_g: 980,
        description: "812-piece building set with working lamp.",
        quantity_in_stock: 12,
        categories: &["Building Sets", "Puzzles"],
    },
    DemoProduct {
        name: "Garden Quest",
        price_cents: 2750,
        color: "green",
        width_cm: 27,
        height_cm: 7,
        weight_g: 900,
        description: "Cooperative game played outdoors or at the table.",
        quantity_in_stock: 8,
        categories: &["Board Games", "Outdoor"],
    },
];

/// Counts of rows inserted by a seeding run.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedSummary {
    pub categories: u64,
    pub products: u64,
}

/// Insert the demo catalog.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a statement fails.
pub async fn catalog() -> Result<SeedSummary, MigrationError> {
    let pool = super::connect().await?;
    seed_catalog(&pool).await
}

async fn seed_catalog(pool: &PgPool) -> Result<SeedSummary, MigrationError> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    for name in CATEGORIES {
        summary.categories += sqlx::query(
            "INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for product in PRODUCTS {
        let inserted = sqlx::query(
            r"
            INSERT INTO products
                (name, price, color, width_cm, height_cm, weight_g, description, quantity_in_stock)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
            ",
        )
        .bind(product.name)
        .bind(Decimal::new(product.price_cents, 2))
        .bind(product.color)
        .bind(product.width_cm)
        .bind(product.height_cm)
        .bind(product.weight_g)
        .bind(product.description)
        .bind(product.quantity_in_stock)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        summary.products += inserted;

        for category in product.categories {
            sqlx::query(
                r"
                INSERT INTO products_categories (product_id, category_id)
                SELECT p.product_id, c.category_id
                FROM products p, categories c
                WHERE p.name = $1 AND c.name = $2
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(product.name)
            .bind(category)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_categories_are_known() {
        for product in PRODUCTS {
            for category in product.categories {
                assert!(
                    CATEGORIES.contains(category),
                    "{} references unknown category {category}",
                    product.name
                );
            }
        }
    }

    #[test]
    fn test_product_names_unique() {
        let mut names: Vec<_> = PRODUCTS.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PRODUCTS.len());
    }

    #[test]
    fn test_demo_values_fit_schema() {
        for product in PRODUCTS {
            assert!(product.price_cents >= 0);
            assert!(product.quantity_in_stock >= 0);
            assert!(!product.color.is_empty());
        }
    }
}
