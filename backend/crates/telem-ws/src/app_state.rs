use crate::{ConnectionId, Metrics, TelemetryHub, WebSocketConnection};

use telem_core::ShutdownCoordinator;
use telem_source::SourceHealth;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use log::{debug, error};

/// Shared application state for WebSocket and HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub hub: TelemetryHub,
    pub source_health: SourceHealth,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
}

/// WebSocket upgrade handler
pub async fn handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let connection_id = ConnectionId::new();
    debug!("WebSocket upgrade request for connection {connection_id}");

    ws.on_upgrade(move |socket| handle_socket(socket, connection_id, state))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(socket: WebSocket, connection_id: ConnectionId, state: AppState) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(connection_id, state.hub, state.metrics);

    if let Err(e) = connection.handle(socket, shutdown_guard).await {
        error!("Connection {connection_id} error: {e}");
    }
}
