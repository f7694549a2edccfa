//! Publisher endpoint handlers.
//!
//! The publish handler forwards the path segment to the broker as-is and
//! reports only success or a generic failure. Broker errors are logged here
//! and never reach the caller.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::queue::MessagePublisher;

pub const PUBLISH_OK_BODY: &str = "Message published successfully";
pub const PUBLISH_FAILED_BODY: &str = "Failed to publish message";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub publisher: Arc<dyn MessagePublisher>,
}

impl AppState {
    pub fn new<P>(publisher: P) -> Self
    where
        P: MessagePublisher + 'static,
    {
        Self {
            publisher: Arc::new(publisher),
        }
    }
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `POST /publish/:message`
pub async fn publish_message(
    State(state): State<AppState>,
    Path(message): Path<String>,
) -> impl IntoResponse {
    info!(message = %message, body_length = message.len(), "publish_request_received");

    if let Err(e) = state.publisher.publish(&message).await {
        error!(error = %e, "publish_failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, PUBLISH_FAILED_BODY);
    }

    (StatusCode::OK, PUBLISH_OK_BODY)
}
