use async_trait::async_trait;
use common::{Money, ProductId};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{Catalog, CatalogError, Product, Result};

/// PostgreSQL-backed catalog implementation.
#[derive(Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Creates a new PostgreSQL catalog over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_product(row: &PgRow) -> Result<Product> {
        Ok(Product {
            id: ProductId::new(row.try_get::<String, _>("id")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            price: Money::from_cents(row.try_get("price_cents")?),
            stock: row.try_get("stock")?,
        })
    }
}

#[async_trait]
impl Catalog for PostgresCatalog {
    async fn find_product(&self, id: &ProductId) -> Result<Product> {
        let row = sqlx::query(
            "SELECT id, name, category, price_cents, stock FROM products WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        Self::row_to_product(&row)
    }

    async fn decrement_stock(&self, id: &ProductId, quantity: i64) -> Result<()> {
        let result = sqlx::query("UPDATE products SET stock = stock - $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(id.clone()));
        }
        Ok(())
    }

    async fn decrement_stock_if_available(&self, id: &ProductId, quantity: i64) -> Result<bool> {
        let result =
            sqlx::query("UPDATE products SET stock = stock - $2 WHERE id = $1 AND stock >= $2")
                .bind(id.as_str())
                .bind(quantity)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
