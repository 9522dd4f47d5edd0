use telem_source::SourceStatus;
use telem_ws::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Body of `GET /healthz`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// False only once the source has stopped; a degraded source still serves buffered data
    pub ok: bool,
    pub source: &'static str,
    pub subscribers: usize,
    pub buffered: usize,
    pub capacity: usize,
    pub dropped: u64,
    pub discarded: u64,
    pub version: &'static str,
    pub timestamp: String,
}

/// GET /healthz - Source status and hub occupancy
pub async fn health_check(State(state): State<AppState>) -> Response {
    let stats = state.hub.stats().await;
    let status = state.source_health.status();

    let health = HealthResponse {
        ok: status != SourceStatus::Stopped,
        source: status.as_str(),
        subscribers: stats.subscribers,
        buffered: stats.buffered,
        capacity: stats.capacity,
        dropped: stats.dropped,
        discarded: state.source_health.discarded(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(health)).into_response()
}
