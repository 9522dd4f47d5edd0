use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use log::{info, warn};

/// Access log line per HTTP request: method, path, status, and latency
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if status.is_server_error() {
        warn!("{method} {path} {} ({elapsed_ms}ms)", status.as_u16());
    } else {
        info!("{method} {path} {} ({elapsed_ms}ms)", status.as_u16());
    }

    response
}
