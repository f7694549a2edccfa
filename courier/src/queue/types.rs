//! The queue contract shared by publisher and consumer.
//!
//! Both sides declare the queue with exactly these options, so whichever
//! connects first creates it and the second declaration is a no-op.

use lapin::{
    options::{BasicConsumeOptions, BasicPublishOptions, QueueDeclareOptions},
    BasicProperties,
};

/// Name of the queue messages are published to and consumed from.
pub const QUEUE_NAME: &str = "publisher";

/// Content type stamped on every published message.
pub const CONTENT_TYPE: &str = "text/plain";

/// Consumer tag used by the consumer service.
pub const CONSUMER_TAG: &str = "courier-consumer";

/// Non-durable, non-exclusive, never auto-deleted.
pub fn declare_options() -> QueueDeclareOptions {
    QueueDeclareOptions {
        passive: false,
        durable: false,
        exclusive: false,
        auto_delete: false,
        nowait: false,
    }
}

/// Neither mandatory nor immediate.
pub fn publish_options() -> BasicPublishOptions {
    BasicPublishOptions {
        mandatory: false,
        immediate: false,
    }
}

pub fn publish_properties() -> BasicProperties {
    BasicProperties::default().with_content_type(CONTENT_TYPE.into())
}

/// Manual acknowledgment on a shared (non-exclusive) subscription.
pub fn consume_options() -> BasicConsumeOptions {
    BasicConsumeOptions {
        no_local: false,
        no_ack: false,
        exclusive: false,
        nowait: false,
    }
}
