//! Courier - minimal RabbitMQ publish/consume pair.
//!
//! This library provides shared modules for the two Courier binaries:
//! - `courier-publisher`: HTTP server that publishes path-embedded messages
//! - `courier-consumer`: Long-running consumer that logs and acknowledges them
//!
//! ## Architecture
//!
//! ```text
//! POST /publish/:message → Publisher → "publisher" queue → Consumer → log
//! ```

pub mod config;
pub mod consumer;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod queue;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use consumer::{HandlerError, LogHandler, MessageHandler, Subscription};
pub use error::QueueError;
pub use queue::{MessagePublisher, Publisher, QUEUE_NAME};
pub use web::AppState;
