use crate::{api, health, request_logging};

use telem_ws::AppState;

use std::path::Path;

use axum::{Router, middleware, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

/// Build the application router with all endpoints
///
/// `/metrics` is mounted only when a Prometheus recorder was installed;
/// `static_dir` adds a fallback serving the dashboard assets.
pub fn build_router(
    state: AppState,
    prometheus: Option<PrometheusHandle>,
    static_dir: Option<&Path>,
) -> Router {
    let mut router = Router::new()
        // WebSocket endpoint
        .route("/ws/telemetry", get(telem_ws::handler))
        // Pull snapshot
        .route("/api/telemetry", get(api::telemetry::get_snapshot))
        // Health check
        .route("/healthz", get(health::health_check));

    if let Some(handle) = prometheus {
        router = router.route("/metrics", get(move || async move { handle.render() }));
    }

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        // Add shared state
        .with_state(state)
        .layer(middleware::from_fn(request_logging::log_request))
        // CORS middleware (allow all origins for the dashboard)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
