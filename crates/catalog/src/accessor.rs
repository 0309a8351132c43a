use async_trait::async_trait;
use common::ProductId;

use crate::{Product, Result};

/// Read access to the product catalog plus stock decrements.
///
/// `decrement_stock` is deliberately unconditional: the order workflow
/// checks stock during validation and decrements afterwards, and those two
/// steps are not bound by any lock or transaction. Concurrent placements
/// for the same product can therefore oversell. Callers that want the
/// atomic variant use [`Catalog::decrement_stock_if_available`].
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Looks up a product by ID.
    ///
    /// Fails with [`crate::CatalogError::NotFound`] if the ID does not
    /// resolve.
    async fn find_product(&self, id: &ProductId) -> Result<Product>;

    /// Reduces the product's stock by `quantity`, unconditionally.
    ///
    /// Fails with [`crate::CatalogError::NotFound`] if the ID does not
    /// resolve. The resulting stock may be negative under concurrent
    /// placements.
    async fn decrement_stock(&self, id: &ProductId, quantity: i64) -> Result<()>;

    /// Atomically reduces stock by `quantity` only if at least that much is
    /// on hand. Returns whether the decrement was applied.
    async fn decrement_stock_if_available(&self, id: &ProductId, quantity: i64) -> Result<bool>;
}
