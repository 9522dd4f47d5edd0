use crate::{
    ConnectionId, Metrics, Result as WsErrorResult, Subscriber, TelemetryHub, WsError, WsSubscriber,
};

use telem_core::ShutdownGuard;

use std::panic::Location;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::StreamExt;

/// Manages a single WebSocket subscriber connection
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    hub: TelemetryHub,
    metrics: Metrics,
}

impl WebSocketConnection {
    pub fn new(connection_id: ConnectionId, hub: TelemetryHub, metrics: Metrics) -> Self {
        Self {
            connection_id,
            hub,
            metrics,
        }
    }

    /// Handle the WebSocket connection lifecycle
    ///
    /// Samples reach the socket through the hub's fanout; this loop only
    /// watches the client side for close and the server side for shutdown.
    pub async fn handle(
        self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        log::info!("WebSocket connection {} established", self.connection_id);

        let (ws_sender, mut ws_receiver) = socket.split();
        let (subscriber, outbox) = WsSubscriber::new();

        let send_task = tokio::spawn(WsSubscriber::pump(outbox, ws_sender));

        self.hub
            .register(self.connection_id, Arc::clone(&subscriber) as Arc<dyn Subscriber>)
            .await;
        subscriber.mark_open();

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Close(_))) | None => {
                            log::info!("Connection {} closed by client", self.connection_id);
                            break Ok(());
                        }
                        Some(Ok(_)) => {
                            // Inbound frames carry no meaning on this endpoint
                        }
                        Some(Err(e)) => {
                            log::warn!(
                                "WebSocket error on connection {}: {}",
                                self.connection_id,
                                e
                            );
                            self.metrics.error_occurred("websocket");
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {e}"),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                    }
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down connection {} gracefully", self.connection_id);
                    break Ok(());
                }
            }
        };

        // Cleanup
        subscriber.mark_closed();
        self.hub
            .unregister(
                self.connection_id,
                if result.is_ok() { "normal" } else { "error" },
            )
            .await;
        drop(subscriber); // Last sender handle; ends the send task
        let _ = send_task.await;

        log::info!("WebSocket connection {} closed", self.connection_id);

        result
    }
}
