//! Order persistence.
//!
//! The [`OrderStore`] trait covers create, list-recent, get-by-id, and
//! update-status, with in-memory and PostgreSQL implementations.

mod error;
mod memory;
mod postgres;
mod store;

pub use error::{OrderStoreError, Result};
pub use memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;
pub use store::{DEFAULT_LIST_LIMIT, OrderStore};
