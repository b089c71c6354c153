//! Logging middleware
//!
//! Logs method, path, status and latency of every HTTP request.

use std::time::Instant;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn, Instrument};

/// Request logging layer body, installed with `axum::middleware::from_fn`
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("http_request", method = %method, path = %path);

    async move {
        let started = Instant::now();
        let response = next.run(request).await;
        let status = response.status();
        let latency_ms = started.elapsed().as_millis() as u64;

        if status.is_server_error() {
            warn!(status = status.as_u16(), latency_ms = latency_ms, "Request failed");
        } else {
            info!(status = status.as_u16(), latency_ms = latency_ms, "Request completed");
        }
        response
    }
    .instrument(span)
    .await
}
