use telem_core::ShutdownCoordinator;
use telem_source::SourceHealth;
use telem_ws::{AppState, HubSettings, Metrics, TelemetryHub, handler};

use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::TestServer;

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

/// Create a TestServer with default hub settings
pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_settings(HubSettings::default())
}

/// Create a TestServer with custom hub settings
pub fn create_test_server_with_settings(settings: HubSettings) -> TestServerWithState {
    let metrics = Metrics::default();
    let hub = TelemetryHub::new(&settings, metrics.clone()).expect("valid hub settings");

    let app_state = AppState {
        hub,
        source_health: SourceHealth::new(),
        metrics,
        shutdown: ShutdownCoordinator::new(),
    };

    let app = Router::new()
        .route("/ws", get(handler))
        .with_state(app_state.clone());

    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

/// Wait until the hub has exactly `expected` registered subscribers
pub async fn wait_for_subscribers(hub: &TelemetryHub, expected: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while hub.stats().await.subscribers != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("subscriber count not reached");

    // Registration and the open transition are back to back; let it land
    tokio::time::sleep(Duration::from_millis(20)).await;
}
