//! Courier Publisher - HTTP front door to the `publisher` queue.
//!
//! Each `POST /publish/:message` opens its own broker connection, declares
//! the queue, publishes the message and disconnects.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use courier::lifecycle::shutdown_signal;
use courier::web::{router, AppState};
use courier::{logging, Config, Publisher};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    info!("publisher_starting");

    let config = Config::from_env();
    info!(
        port = config.port,
        rabbit_host = %config.rabbit_host,
        rabbit_port = %config.rabbit_port,
        rabbit_user = %config.rabbit_user,
        "config_loaded"
    );

    let publisher = Publisher::new(config.amqp_url());
    let app = router(AppState::new(publisher));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "publisher_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("publisher_shutting_down");
        })
        .await
        .context("Server error")?;

    info!("publisher_shutdown_complete");

    Ok(())
}
