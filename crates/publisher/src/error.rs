use thiserror::Error;

/// Errors that can occur while publishing a notification.
///
/// These never propagate to order-placement callers; the workflow records
/// them for operator diagnosis only.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The messaging channel rejected or dropped the send.
    #[error("Channel error: {0}")]
    Channel(#[from] redis::RedisError),

    /// Payload serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Injected failure from a test double.
    #[error("Publish failed: {0}")]
    Failed(String),
}
