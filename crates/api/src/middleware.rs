use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Log one line per request with method, path, status and latency.
pub async fn trace_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let resp = next.run(req).await;

    let status = resp.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), latency_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), latency_ms, "request handled");
    }
    resp
}
