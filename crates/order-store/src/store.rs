use async_trait::async_trait;
use common::OrderId;
use domain::{NewOrder, Order, OrderStatus};

use crate::Result;

/// Default number of records returned by list-recent callers.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Persistence for order records.
///
/// `update_status` takes the typed [`OrderStatus`], so an invalid status
/// string is rejected at the edge before the store is ever reached.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Assigns an identifier and timestamps, persists the order, and
    /// returns the stored record.
    async fn create(&self, order: NewOrder) -> Result<Order>;

    /// Returns up to `limit` orders, newest first by creation time.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Order>>;

    /// Loads an order by ID, failing with
    /// [`crate::OrderStoreError::NotFound`] if absent.
    async fn get(&self, id: OrderId) -> Result<Order>;

    /// Sets the order's status and bumps `updated_at`, returning the
    /// updated record. Any of the three statuses is accepted regardless of
    /// the current one.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order>;
}
