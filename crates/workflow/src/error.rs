use catalog::CatalogError;
use common::OrderId;
use domain::OrderError;
use order_store::OrderStoreError;
use thiserror::Error;

/// Errors surfaced by the order workflow.
///
/// `Validation` carries the client-facing reasons; `OrderNotFound` maps to
/// 404; `Catalog` and `Store` are infrastructure failures surfaced to the
/// client only as a generic server error.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The request failed validation; safe to show to the client.
    #[error(transparent)]
    Validation(OrderError),

    /// The order was not found.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The catalog failed for a non-validation reason.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The order store failed for a non-lookup reason.
    #[error("Order store error: {0}")]
    Store(OrderStoreError),
}

impl From<OrderError> for WorkflowError {
    fn from(e: OrderError) -> Self {
        match e {
            // Lookup infrastructure failures are not client errors.
            OrderError::Catalog(inner) => WorkflowError::Catalog(inner),
            other => WorkflowError::Validation(other),
        }
    }
}

impl From<OrderStoreError> for WorkflowError {
    fn from(e: OrderStoreError) -> Self {
        match e {
            OrderStoreError::NotFound(id) => WorkflowError::OrderNotFound(id),
            other => WorkflowError::Store(other),
        }
    }
}
