//! Connection and queue setup common to both services.

use lapin::{types::FieldTable, Channel, Connection, ConnectionProperties, Queue};
use tracing::{info, warn};

use super::types::{declare_options, QUEUE_NAME};
use crate::error::QueueError;

/// Open a connection to the broker.
pub async fn connect(url: &str) -> Result<Connection, QueueError> {
    info!(url_length = url.len(), "rabbitmq_connecting");

    let conn = Connection::connect(url, ConnectionProperties::default())
        .await
        .map_err(QueueError::Connect)?;

    info!("rabbitmq_connected");
    Ok(conn)
}

/// Open a channel and make sure the shared queue exists.
pub async fn open_channel(conn: &Connection) -> Result<(Channel, Queue), QueueError> {
    let channel = conn.create_channel().await.map_err(QueueError::Channel)?;

    let queue = channel
        .queue_declare(QUEUE_NAME, declare_options(), FieldTable::default())
        .await
        .map_err(|source| QueueError::Declare {
            queue: QUEUE_NAME.to_string(),
            source,
        })?;

    info!(
        queue = QUEUE_NAME,
        messages = queue.message_count(),
        consumers = queue.consumer_count(),
        "rabbitmq_queue_declared"
    );

    Ok((channel, queue))
}

/// Close a channel, logging rather than failing.
pub async fn close_channel(channel: &Channel) {
    if let Err(e) = channel.close(200, "Normal shutdown").await {
        warn!(error = %e, "rabbitmq_channel_close_error");
    }
}

/// Close a connection, logging rather than failing.
pub async fn close_connection(conn: &Connection) {
    if let Err(e) = conn.close(200, "Normal shutdown").await {
        warn!(error = %e, "rabbitmq_connection_close_error");
    }
}
