use common::ProductId;
use thiserror::Error;

/// Errors that can occur when accessing the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product ID did not resolve to a catalog entry.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
