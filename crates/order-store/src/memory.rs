use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::OrderId;
use domain::{NewOrder, Order, OrderStatus};
use tokio::sync::RwLock;

use crate::{OrderStore, OrderStoreError, Result};

/// In-memory order store implementation for testing and local runs.
///
/// Stores all orders in memory and provides the same interface as the
/// PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order> {
        let now = Utc::now();
        let order = Order {
            id: OrderId::new(),
            customer_email: order.customer_email,
            status: OrderStatus::Pending,
            lines: order.lines,
            total_amount: order.total_amount,
            created_at: now,
            updated_at: now,
        };

        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;

        // Reverse insertion order first so that equal timestamps still come
        // back newest-inserted first; the stable sort keeps that ordering.
        let mut recent: Vec<Order> = orders.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn get(&self, id: OrderId) -> Result<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(OrderStoreError::NotFound(id))
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(OrderStoreError::NotFound(id))?;

        order.status = status;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}
