use async_trait::async_trait;
use domain::Order;

use crate::PublishError;

/// Outbound notification channel for order creation.
///
/// Object-safe so the concrete publisher can be chosen at startup from
/// configuration and injected as `Arc<dyn EventPublisher>`.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Builds the order-created payload and sends it to the channel.
    async fn publish_order_created(&self, order: &Order) -> Result<(), PublishError>;
}
