use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::Order;

use crate::{EventPublisher, OrderCreatedPayload, PublishError};

#[derive(Debug, Default)]
struct InMemoryPublisherState {
    published: Vec<OrderCreatedPayload>,
    fail_on_publish: bool,
}

/// In-memory publisher for testing.
///
/// Records every payload it is asked to send and can be switched to fail,
/// for exercising the fire-and-forget contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPublisher {
    state: Arc<RwLock<InMemoryPublisherState>>,
}

impl InMemoryPublisher {
    /// Creates a new in-memory publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the publisher to fail every subsequent publish call.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_on_publish = fail;
    }

    /// Returns the number of payloads published so far.
    pub fn publish_count(&self) -> usize {
        self.state.read().unwrap().published.len()
    }

    /// Returns copies of all published payloads, in publish order.
    pub fn published(&self) -> Vec<OrderCreatedPayload> {
        self.state.read().unwrap().published.clone()
    }
}

#[async_trait]
impl EventPublisher for InMemoryPublisher {
    async fn publish_order_created(&self, order: &Order) -> Result<(), PublishError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_publish {
            return Err(PublishError::Failed("channel unavailable".to_string()));
        }

        state.published.push(OrderCreatedPayload::from(order));
        Ok(())
    }
}
