//! RabbitMQ consumer using lapin.
//!
//! A [`Subscription`] owns one connection, one channel and one consumer
//! stream for the lifetime of the process. Deliveries are handled one at a
//! time in the order the broker sends them, then settled according to the
//! handler's result.

use async_trait::async_trait;
use futures::StreamExt;
use lapin::{
    message::Delivery,
    options::{BasicAckOptions, BasicNackOptions},
    types::FieldTable,
    Channel, Connection, Consumer,
};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::QueueError;
use crate::queue::broker::{connect, open_channel};
use crate::queue::types::{consume_options, CONSUMER_TAG, QUEUE_NAME};

/// Processing step applied to every delivered message body.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, body: &[u8]) -> Result<(), HandlerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Transient error (will requeue): {0}")]
    Transient(String),

    #[error("Permanent error (will not requeue): {0}")]
    Permanent(String),
}

/// Logs each message body. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHandler;

#[async_trait]
impl MessageHandler for LogHandler {
    async fn handle(&self, body: &[u8]) -> Result<(), HandlerError> {
        info!(
            queue = QUEUE_NAME,
            "Received a message: {}",
            String::from_utf8_lossy(body)
        );
        Ok(())
    }
}

/// How a delivery is settled with the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Ack,
    Requeue,
    Reject,
}

/// Run the handler and decide how to settle the delivery.
pub async fn process<H>(handler: &H, body: &[u8]) -> Settlement
where
    H: MessageHandler + ?Sized,
{
    match handler.handle(body).await {
        Ok(()) => Settlement::Ack,
        Err(e @ HandlerError::Transient(_)) => {
            warn!(error = %e, "message_requeued");
            Settlement::Requeue
        }
        Err(e @ HandlerError::Permanent(_)) => {
            error!(error = %e, "message_rejected");
            Settlement::Reject
        }
    }
}

/// A live subscription to the shared queue.
pub struct Subscription {
    connection: Connection,
    channel: Channel,
    consumer: Consumer,
}

impl Subscription {
    /// Connect, declare the queue and start consuming.
    ///
    /// Any failure here is a startup failure; nothing is retried.
    pub async fn open(url: &str) -> Result<Self, QueueError> {
        let connection = connect(url).await?;
        let (channel, queue) = open_channel(&connection).await?;

        let consumer = channel
            .basic_consume(
                queue.name().as_str(),
                CONSUMER_TAG,
                consume_options(),
                FieldTable::default(),
            )
            .await
            .map_err(|source| QueueError::Consume {
                queue: QUEUE_NAME.to_string(),
                source,
            })?;

        info!(queue = QUEUE_NAME, consumer_tag = CONSUMER_TAG, "rabbitmq_consumer_started");

        Ok(Self {
            connection,
            channel,
            consumer,
        })
    }

    /// Move the receive loop onto its own task.
    ///
    /// The task finishes only when the broker ends the delivery stream.
    pub fn spawn<H>(self, handler: H) -> JoinHandle<()>
    where
        H: MessageHandler + 'static,
    {
        tokio::spawn(self.run(handler))
    }

    async fn run<H>(self, handler: H)
    where
        H: MessageHandler,
    {
        let Subscription {
            connection,
            channel,
            mut consumer,
        } = self;

        while let Some(delivery) = consumer.next().await {
            match delivery {
                Ok(delivery) => {
                    let settlement = process(&handler, &delivery.data).await;
                    if let Err(e) = settle(&delivery, settlement).await {
                        error!(error = %e, "message_settle_failed");
                    }
                }
                Err(e) => {
                    error!(error = %e, "rabbitmq_delivery_error");
                }
            }
        }

        warn!(
            channel_connected = channel.status().connected(),
            connection_connected = connection.status().connected(),
            "rabbitmq_consumer_closed"
        );
    }
}

async fn settle(delivery: &Delivery, settlement: Settlement) -> Result<(), QueueError> {
    let delivery_tag = delivery.delivery_tag;
    let result = match settlement {
        Settlement::Ack => delivery.acker.ack(BasicAckOptions::default()).await,
        Settlement::Requeue => {
            delivery
                .acker
                .nack(BasicNackOptions {
                    requeue: true,
                    ..Default::default()
                })
                .await
        }
        Settlement::Reject => {
            delivery
                .acker
                .nack(BasicNackOptions {
                    requeue: false,
                    ..Default::default()
                })
                .await
        }
    };

    result
        .map(|_| ())
        .map_err(|source| QueueError::Settle {
            delivery_tag,
            source,
        })
}
