//! The order workflow orchestrator.

use std::sync::Arc;

use catalog::Catalog;
use common::OrderId;
use domain::{LineRequest, NewOrder, Order, OrderStatus, resolve_lines};
use order_store::{DEFAULT_LIST_LIMIT, OrderStore};
use publisher::EventPublisher;

use crate::WorkflowError;

/// A place-order request after HTTP-shape validation.
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    pub customer_email: Option<String>,
    pub items: Vec<LineRequest>,
}

/// Orchestrates order placement and the status lifecycle.
///
/// Per order the state machine is `(none) -> Pending -> {Completed,
/// Cancelled}`; Pending is the only initial state. Placement runs
/// validation, persistence, detached event publication, and sequential
/// stock decrements — with no transaction binding those steps. The
/// publisher is a trait object because the concrete channel is chosen at
/// startup from configuration.
pub struct OrderWorkflow<C, S>
where
    C: Catalog,
    S: OrderStore,
{
    catalog: C,
    store: S,
    publisher: Arc<dyn EventPublisher>,
}

impl<C, S> OrderWorkflow<C, S>
where
    C: Catalog,
    S: OrderStore,
{
    /// Creates a new workflow over the injected collaborators.
    pub fn new(catalog: C, store: S, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            catalog,
            store,
            publisher,
        }
    }

    /// Places an order.
    ///
    /// 1. Validates and prices the requested items against the catalog.
    /// 2. Persists the Pending order.
    /// 3. Spawns the order-created publication as a detached task; its
    ///    outcome is observed only by logs and metrics.
    /// 4. Decrements stock per line, sequentially in line order. A failure
    ///    here is logged and counted but rolls back nothing: the order and
    ///    any earlier decrements stand, and the caller still gets the
    ///    created record.
    ///
    /// The stock check (during validation) and the decrement are separate
    /// operations with no lock between them; concurrent placements for the
    /// same product can oversell.
    #[tracing::instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn place_order(&self, request: PlaceOrderRequest) -> Result<Order, WorkflowError> {
        let (lines, total) = resolve_lines(&self.catalog, &request.items).await?;

        let order = self
            .store
            .create(NewOrder {
                customer_email: request.customer_email,
                lines,
                total_amount: total,
            })
            .await?;

        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(order_id = %order.id, total = %order.total_amount, "order placed");

        let publisher = Arc::clone(&self.publisher);
        let created = order.clone();
        tokio::spawn(async move {
            if let Err(e) = publisher.publish_order_created(&created).await {
                metrics::counter!("order_publish_failures_total").increment(1);
                tracing::warn!(
                    order_id = %created.id,
                    error = %e,
                    "order-created publish failed"
                );
            }
        });

        for line in &order.lines {
            if let Err(e) = self
                .catalog
                .decrement_stock(&line.product_id, line.quantity)
                .await
            {
                metrics::counter!("stock_decrement_failures_total").increment(1);
                tracing::error!(
                    order_id = %order.id,
                    product_id = %line.product_id,
                    error = %e,
                    "stock decrement failed; order and earlier decrements stand"
                );
            }
        }

        Ok(order)
    }

    /// Returns up to 50 most recent orders, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, WorkflowError> {
        Ok(self.store.list_recent(DEFAULT_LIST_LIMIT).await?)
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, WorkflowError> {
        Ok(self.store.get(id).await?)
    }

    /// Updates an order's status from its wire form.
    ///
    /// The status string is parsed case-insensitively into the three
    /// allowed values; anything else is rejected before the store is
    /// touched. Transitions are permissive: any allowed value is accepted
    /// regardless of the current status.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, status: &str) -> Result<Order, WorkflowError> {
        let status: OrderStatus = status.parse().map_err(WorkflowError::from)?;
        Ok(self.store.update_status(id, status).await?)
    }
}
