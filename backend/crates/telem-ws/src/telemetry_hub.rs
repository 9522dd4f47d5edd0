use crate::{
    BroadcastRegistry, ConnectionId, FanoutOutcome, HubSettings, Metrics, Result as WsResult,
    Subscriber,
};

use telem_core::{RateMeter, RingBuffer, Sample, ShutdownGuard, TelemetrySnapshot};

use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info};
use tokio::sync::{RwLock, mpsc};

/// Everything the ingestion path mutates, guarded by one lock so a snapshot
/// never observes a sample in the buffer without its rate tick.
struct HubState {
    buffer: RingBuffer,
    rate: RateMeter,
    dropped: u64,
    registry: BroadcastRegistry,
}

/// Point-in-time counters for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubStats {
    pub subscribers: usize,
    pub buffered: usize,
    pub capacity: usize,
    pub dropped: u64,
}

/// Shared hub handle: ring buffer, rate meter, and subscriber fanout.
#[derive(Clone)]
pub struct TelemetryHub {
    inner: Arc<RwLock<HubState>>,
    metrics: Metrics,
}

impl TelemetryHub {
    #[track_caller]
    pub fn new(settings: &HubSettings, metrics: Metrics) -> WsResult<Self> {
        let buffer = RingBuffer::new(settings.buffer_capacity)?;
        let rate = RateMeter::new(settings.rate_window, Instant::now())?;

        info!(
            "Telemetry hub ready (buffer={}, backlog threshold={}B, rate window={}ms)",
            settings.buffer_capacity,
            settings.backlog_threshold_bytes,
            settings.rate_window.as_millis()
        );

        Ok(Self {
            inner: Arc::new(RwLock::new(HubState {
                buffer,
                rate,
                dropped: 0,
                registry: BroadcastRegistry::new(settings.backlog_threshold_bytes),
            })),
            metrics,
        })
    }

    /// Append, count, and fan out one sample as a single step.
    pub async fn ingest(&self, sample: Sample) -> FanoutOutcome {
        let mut state = self.inner.write().await;
        let now = Instant::now();

        state.buffer.append(sample);
        state.rate.tick(now);

        let outcome = match state.registry.fanout(&sample) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Failed to encode sample t={}: {e}", sample.t);
                self.metrics.error_occurred("encode");
                FanoutOutcome::default()
            }
        };

        if outcome.dropped > 0 {
            state.dropped += outcome.dropped as u64;
            self.metrics.samples_dropped(outcome.dropped);
        }

        self.metrics.sample_ingested();
        self.metrics
            .rate(state.rate.instant_rate(now), state.rate.windowed_rate());

        outcome
    }

    pub async fn snapshot(&self) -> TelemetrySnapshot {
        let state = self.inner.read().await;
        let now = Instant::now();

        TelemetrySnapshot {
            data: state.buffer.snapshot(),
            mpm: state.rate.instant_rate(now),
            dropped: state.dropped,
        }
    }

    pub async fn register(&self, connection_id: ConnectionId, subscriber: Arc<dyn Subscriber>) {
        let mut state = self.inner.write().await;
        state.registry.register(connection_id, subscriber);
        self.metrics.subscriber_registered(state.registry.len());
    }

    /// Idempotent; the registry may already have pruned a closed subscriber.
    pub async fn unregister(&self, connection_id: ConnectionId, reason: &str) {
        let mut state = self.inner.write().await;
        if state.registry.unregister(connection_id) {
            self.metrics
                .subscriber_closed(reason, state.registry.len());
        }
    }

    pub async fn stats(&self) -> HubStats {
        let state = self.inner.read().await;
        HubStats {
            subscribers: state.registry.len(),
            buffered: state.buffer.len(),
            capacity: state.buffer.capacity(),
            dropped: state.dropped,
        }
    }

    /// Drain the sample queue into the hub until the queue closes or shutdown.
    ///
    /// This is the only caller of [`TelemetryHub::ingest`] in the server, so
    /// samples are applied in arrival order.
    pub async fn run_ingest(&self, mut samples: mpsc::Receiver<Sample>, mut shutdown: ShutdownGuard) {
        info!("Ingest loop started");
        let mut ingested: u64 = 0;

        loop {
            tokio::select! {
                next = samples.recv() => {
                    let Some(sample) = next else {
                        debug!("Sample queue closed");
                        break;
                    };
                    self.ingest(sample).await;
                    ingested += 1;
                }
                _ = shutdown.wait() => {
                    debug!("Ingest loop received shutdown");
                    break;
                }
            }
        }

        info!("Ingest loop stopped after {ingested} samples");
    }
}
