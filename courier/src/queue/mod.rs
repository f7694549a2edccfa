//! Queue module for RabbitMQ operations.
//!
//! This module provides:
//! - The shared queue contract (name, declare/publish/consume options)
//! - Connection and channel setup used by both services
//! - A per-request publisher
//!
//! ## Architecture
//!
//! ```text
//! HTTP caller → Publisher → "publisher" queue → Consumer → log
//! ```

pub mod broker;
pub mod publisher;
pub mod types;

pub use publisher::{MessagePublisher, Publisher};
pub use types::{CONSUMER_TAG, CONTENT_TYPE, QUEUE_NAME};
