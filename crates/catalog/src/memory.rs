use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use crate::{Catalog, CatalogError, Product, Result};

/// In-memory catalog implementation for testing and local runs.
///
/// Provides the same interface as the PostgreSQL implementation, plus
/// seeding and inspection helpers and a failure switch for exercising the
/// workflow's no-rollback behavior.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    fail_decrements: Arc<AtomicBool>,
}

impl InMemoryCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-seeded with the given products.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map: HashMap<ProductId, Product> = products
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Self {
            products: Arc::new(RwLock::new(map)),
            fail_decrements: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Inserts or replaces a product.
    pub async fn upsert(&self, product: Product) {
        self.products.write().await.insert(product.id.clone(), product);
    }

    /// Returns the current stock for a product, if it exists.
    pub async fn stock_of(&self, id: &ProductId) -> Option<i64> {
        self.products.read().await.get(id).map(|p| p.stock)
    }

    /// Makes every subsequent decrement call fail.
    pub fn set_fail_decrements(&self, fail: bool) {
        self.fail_decrements.store(fail, Ordering::SeqCst);
    }

    fn decrements_failing(&self) -> bool {
        self.fail_decrements.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn find_product(&self, id: &ProductId) -> Result<Product> {
        self.products
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    async fn decrement_stock(&self, id: &ProductId, quantity: i64) -> Result<()> {
        if self.decrements_failing() {
            return Err(CatalogError::Database(sqlx::Error::PoolClosed));
        }

        let mut products = self.products.write().await;
        let product = products
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        product.stock -= quantity;
        Ok(())
    }

    async fn decrement_stock_if_available(&self, id: &ProductId, quantity: i64) -> Result<bool> {
        if self.decrements_failing() {
            return Err(CatalogError::Database(sqlx::Error::PoolClosed));
        }

        let mut products = self.products.write().await;
        let product = products
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        if product.stock < quantity {
            return Ok(false);
        }
        product.stock -= quantity;
        Ok(true)
    }
}
