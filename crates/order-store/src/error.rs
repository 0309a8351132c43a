use common::OrderId;
use thiserror::Error;

/// Errors that can occur when persisting or loading orders.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// The order was not found in the store.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, OrderStoreError>;
