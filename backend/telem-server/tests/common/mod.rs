#![allow(dead_code)]

//! Test infrastructure for telem-server router tests

use telem_core::ShutdownCoordinator;
use telem_source::SourceHealth;
use telem_ws::{AppState, HubSettings, Metrics, TelemetryHub};

use std::time::Duration;

/// Create AppState around a hub with the given buffer capacity
pub fn create_test_app_state(buffer_capacity: usize) -> AppState {
    let settings = HubSettings {
        buffer_capacity,
        ..HubSettings::default()
    };
    let metrics = Metrics::new();

    AppState {
        hub: TelemetryHub::new(&settings, metrics.clone()).expect("valid hub settings"),
        source_health: SourceHealth::new(),
        metrics,
        shutdown: ShutdownCoordinator::new(),
    }
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

    tokio::time::sleep(Duration::from_millis(20)).await;
}
