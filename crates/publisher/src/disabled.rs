use async_trait::async_trait;
use domain::Order;

use crate::{EventPublisher, PublishError};

/// The inert publisher used when no messaging channel is configured.
///
/// Every publish call is a no-op that reports the condition and succeeds,
/// so an unconfigured channel never disturbs order placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPublisher;

#[async_trait]
impl EventPublisher for DisabledPublisher {
    async fn publish_order_created(&self, order: &Order) -> Result<(), PublishError> {
        tracing::debug!(
            order_id = %order.id,
            "event publishing disabled; dropping order-created notification"
        );
        Ok(())
    }
}
