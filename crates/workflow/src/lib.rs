//! Order placement workflow.
//!
//! [`OrderWorkflow`] glues the catalog, the order store, and the event
//! publisher into the end-to-end place-order operation plus the status
//! lifecycle operations. All collaborators are injected, so test doubles
//! substitute freely.

mod error;
mod orchestrator;

pub use error::WorkflowError;
pub use orchestrator::{OrderWorkflow, PlaceOrderRequest};
