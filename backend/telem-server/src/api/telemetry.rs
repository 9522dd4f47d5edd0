use telem_core::TelemetrySnapshot;
use telem_ws::AppState;

use axum::{Json, extract::State};
use log::debug;

/// GET /api/telemetry - Buffered samples, current rate, and drop count
pub async fn get_snapshot(State(state): State<AppState>) -> Json<TelemetrySnapshot> {
    let snapshot = state.hub.snapshot().await;
    debug!(
        "Serving snapshot: {} samples, {} mpm, {} dropped",
        snapshot.data.len(),
        snapshot.mpm,
        snapshot.dropped
    );
    Json(snapshot)
}
