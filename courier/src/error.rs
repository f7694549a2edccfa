//! Broker error types.

use thiserror::Error;

/// Errors raised while talking to RabbitMQ.
///
/// Every variant is treated the same by callers: the publisher turns it into
/// an HTTP 500, the consumer treats it as fatal during startup.
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("failed to connect to RabbitMQ: {0}")]
    Connect(lapin::Error),

    #[error("failed to open a channel: {0}")]
    Channel(lapin::Error),

    #[error("failed to declare queue {queue}: {source}")]
    Declare { queue: String, source: lapin::Error },

    #[error("failed to publish a message: {0}")]
    Publish(lapin::Error),

    #[error("failed to start consuming from {queue}: {source}")]
    Consume { queue: String, source: lapin::Error },

    #[error("failed to settle delivery {delivery_tag}: {source}")]
    Settle { delivery_tag: u64, source: lapin::Error },
}
