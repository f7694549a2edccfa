//! Web server module for the publisher service.
//!
//! Routes:
//! - `POST /publish/:message` enqueues the path segment as a text message
//! - `GET /health` reports liveness without touching the broker

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    health, publish_message, AppState, HealthResponse, PUBLISH_FAILED_BODY, PUBLISH_OK_BODY,
};

/// Build the publisher router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/publish/:message", post(publish_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
