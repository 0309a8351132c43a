use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A product as known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier (SKU).
    pub id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Optional product category.
    pub category: Option<String>,

    /// Price per unit in cents. Never negative.
    pub price: Money,

    /// Units on hand. Nominally non-negative, but typed signed: the
    /// check-then-decrement window between concurrent placements can
    /// oversell and drive this below zero.
    pub stock: i64,
}

impl Product {
    /// Creates a new product with no category.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            price,
            stock,
        }
    }

    /// Sets the product category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
