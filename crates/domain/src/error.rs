//! Order validation error types.

use catalog::CatalogError;
use common::ProductId;
use thiserror::Error;

/// Errors raised while validating an order request.
///
/// All variants except [`OrderError::Catalog`] are client errors; the HTTP
/// layer maps them to 400 responses carrying the display text below.
/// `Catalog` wraps infrastructure failures during lookup and surfaces as a
/// generic server error.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The requested item list was empty.
    #[error("Order must contain at least one item")]
    NoItems,

    /// An item had a missing, zero, or negative quantity.
    #[error("Invalid quantity for product: {product_id}")]
    InvalidQuantity { product_id: ProductId },

    /// An item referenced a product the catalog does not know.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// An item requested more units than the product has in stock.
    #[error("Not enough stock for product: {0}")]
    InsufficientStock(ProductId),

    /// A status string did not parse to one of the allowed values.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// The catalog itself failed during lookup; not a client error.
    #[error("Catalog error: {0}")]
    Catalog(#[source] CatalogError),
}
