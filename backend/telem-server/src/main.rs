use telem_server::{build_router, error::ServerError, logger};

use telem_core::ShutdownCoordinator;
use telem_source::{SampleSink, SourceHealth, build_source};
use telem_ws::{AppState, HubSettings, Metrics, TelemetryHub};

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use log::{error, info, warn};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);
const TASK_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is normal
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = telem_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting telem-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Prometheus recorder backing the Metrics facade
    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::metrics_exporter(e.to_string()))?;
    let upkeep_handle = prometheus.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            upkeep_handle.run_upkeep();
        }
    });

    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new();

    // Hub and its single ingestion queue
    let hub = TelemetryHub::new(&HubSettings::from(&config.hub), metrics.clone())?;
    let (sink, samples) = SampleSink::channel(config.hub.ingest_queue_capacity);

    let ingest_task = {
        let hub = hub.clone();
        let guard = shutdown.subscribe_guard();
        tokio::spawn(async move { hub.run_ingest(samples, guard).await })
    };

    // Selected sample source
    let source_health = SourceHealth::new();
    let source = build_source(&config.source, source_health.clone());
    info!("Starting {} source", source.name());
    let source_task = tokio::spawn(source.run(sink, shutdown.subscribe_guard()));

    // Build application state
    let app_state = AppState {
        hub,
        source_health,
        metrics,
        shutdown: shutdown.clone(),
    };

    // Build router
    let static_dir = config.server.static_dir.as_deref().map(Path::new);
    let app = build_router(app_state, Some(prometheus), static_dir);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    let mut server_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            server_guard.wait().await;
        })
        .await?;

    // Let the source and ingest loop observe the signal and stop
    for (name, task) in [("source", source_task), ("ingest", ingest_task)] {
        match tokio::time::timeout(TASK_DRAIN_TIMEOUT, task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("{name} task failed: {e}"),
            Err(_) => warn!("{name} task did not stop within {TASK_DRAIN_TIMEOUT:?}"),
        }
    }

    info!("Graceful shutdown complete");
    Ok(())
}
