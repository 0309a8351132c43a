use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId};
use domain::{Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// One line item as it appears in the outbound notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

/// The order-created notification payload.
///
/// Serialized as JSON with camelCase field names:
/// `{orderId, customerEmail, items, totalAmount, status, createdAt}`.
/// `customerEmail` is null when the order carries none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedPayload {
    pub order_id: OrderId,
    pub customer_email: Option<String>,
    pub items: Vec<OrderCreatedItem>,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderCreatedPayload {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            customer_email: order.customer_email.clone(),
            items: order
                .lines
                .iter()
                .map(|line| OrderCreatedItem {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at,
        }
    }
}
