use async_trait::async_trait;
use domain::Order;
use redis::AsyncCommands;

use crate::{EventPublisher, OrderCreatedPayload, PublishError};

/// Redis pub/sub publisher for order-created notifications.
///
/// Redis pub/sub is not durable: subscribers that are offline miss the
/// message. That matches the best-effort contract of this channel.
#[derive(Clone)]
pub struct RedisPublisher {
    client: redis::Client,
    channel: String,
}

impl RedisPublisher {
    /// Creates a publisher for the given connection string and channel.
    pub fn new(url: &str, channel: impl Into<String>) -> Result<Self, PublishError> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            channel: channel.into(),
        })
    }

    /// The destination channel name.
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

#[async_trait]
impl EventPublisher for RedisPublisher {
    async fn publish_order_created(&self, order: &Order) -> Result<(), PublishError> {
        let payload = serde_json::to_string(&OrderCreatedPayload::from(order))?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let receivers: i64 = conn.publish(&self.channel, payload).await?;

        tracing::debug!(
            order_id = %order.id,
            channel = %self.channel,
            receivers,
            "published order-created notification"
        );
        Ok(())
    }
}
