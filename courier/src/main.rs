//! Courier Consumer - drains the `publisher` queue and logs each message.
//!
//! Startup failures (connect, channel, declare, consume) are fatal. Once
//! subscribed, the receive loop runs on its own task until the process is
//! signalled or the broker closes the stream.

use anyhow::{bail, Context, Result};
use tracing::{error, info};

use courier::lifecycle::shutdown_signal;
use courier::{logging, Config, LogHandler, Subscription};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    info!("consumer_starting");

    let config = Config::from_env();
    info!(
        rabbit_host = %config.rabbit_host,
        rabbit_port = %config.rabbit_port,
        rabbit_user = %config.rabbit_user,
        "config_loaded"
    );

    let subscription = match Subscription::open(&config.amqp_url()).await {
        Ok(subscription) => subscription,
        Err(e) => {
            error!(error = %e, "consumer_start_failed");
            return Err(e).context("Failed to start consumer");
        }
    };

    let receiver = subscription.spawn(LogHandler);
    info!("consumer_running");

    tokio::select! {
        _ = shutdown_signal() => {
            info!("consumer_stopping");
        }
        joined = receiver => {
            joined.context("Receive loop panicked")?;
            bail!("RabbitMQ closed the delivery stream");
        }
    }

    info!("consumer_shutdown_complete");
    Ok(())
}
