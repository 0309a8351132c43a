//! Product catalog accessor.
//!
//! Read-only product lookup plus stock decrements, behind the [`Catalog`]
//! trait so the order workflow can run against either the in-memory or the
//! PostgreSQL backend.

mod accessor;
mod error;
mod memory;
mod postgres;
mod product;

pub use accessor::Catalog;
pub use error::{CatalogError, Result};
pub use memory::InMemoryCatalog;
pub use postgres::PostgresCatalog;
pub use product::Product;
