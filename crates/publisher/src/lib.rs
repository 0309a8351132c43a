//! Best-effort publication of order-created notifications.
//!
//! Publishing is fire-and-forget with respect to order placement: failures
//! are reported to the diagnostic sink (logs, metrics) and never surface to
//! the caller. When the channel is unconfigured, the [`DisabledPublisher`]
//! turns every publish into a logged no-op.

mod disabled;
mod error;
mod memory;
mod payload;
mod publish;
mod redis_channel;

pub use disabled::DisabledPublisher;
pub use error::PublishError;
pub use memory::InMemoryPublisher;
pub use payload::{OrderCreatedItem, OrderCreatedPayload};
pub use publish::EventPublisher;
pub use redis_channel::RedisPublisher;
