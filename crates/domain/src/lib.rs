//! Order domain model.
//!
//! Provides the persisted [`Order`] record, its [`OrderLine`]s and
//! [`OrderStatus`] lifecycle, and the line-item validator that resolves
//! requested items against the catalog.

pub mod error;
pub mod order;
pub mod validator;

pub use error::OrderError;
pub use order::{LineRequest, NewOrder, Order, OrderLine, OrderStatus};
pub use validator::resolve_lines;
