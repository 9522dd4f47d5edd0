use axum_test::{TestServer, TestWebSocket};

/// WebSocket test client wrapper
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    /// Connect to the telemetry WebSocket endpoint
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server.get_websocket("/ws").await.into_websocket().await;

        Self { ws }
    }

    /// Receive text message
    pub async fn receive_text(&mut self) -> String {
        self.ws.receive_text().await
    }

    /// Send text message; the server ignores it
    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Close the WebSocket connection
    pub async fn close(self) {
        self.ws.close().await;
    }
}
