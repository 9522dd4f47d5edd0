use crate::{SampleSink, SampleSource, SourceHealth, SourceStatus};

use telem_config::MockConfig;
use telem_core::{Sample, ShutdownGuard};

use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::info;
use tokio::time::MissedTickBehavior;

pub const SIGNAL_CENTER: f64 = 512.0;
pub const SIGNAL_AMPLITUDE: f64 = 400.0;
pub const SIGNAL_JITTER: f64 = 50.0;
pub const SIGNAL_PHASE_STEP: f64 = 0.1;
pub const SIGNAL_MIN: f64 = 0.0;
pub const SIGNAL_MAX: f64 = 1023.0;

/// Sine wave plus jitter, sized like a 10-bit ADC reading.
#[derive(Debug, Clone)]
pub struct MockSignal {
    started: Instant,
    phase: f64,
}

impl MockSignal {
    pub fn new(started: Instant) -> Self {
        Self {
            started,
            phase: 0.0,
        }
    }

    /// Advance one tick. `jitter` is expected in `[0, 1)`.
    pub fn next_sample(&mut self, now: Instant, jitter: f64) -> Sample {
        self.phase += SIGNAL_PHASE_STEP;
        let t = now.saturating_duration_since(self.started).as_millis();
        Sample::new(
            i64::try_from(t).unwrap_or(i64::MAX),
            synthesize(self.phase, jitter),
        )
    }
}

pub fn synthesize(phase: f64, jitter: f64) -> f64 {
    (SIGNAL_CENTER + SIGNAL_AMPLITUDE * phase.sin() + SIGNAL_JITTER * jitter)
        .round()
        .clamp(SIGNAL_MIN, SIGNAL_MAX)
}

/// Synthesizes samples on a fixed tick, for demos and development without hardware.
pub struct MockSource {
    tick: Duration,
    health: SourceHealth,
}

impl MockSource {
    pub fn new(config: &MockConfig, health: SourceHealth) -> Self {
        Self {
            tick: Duration::from_millis(config.tick_ms.max(1)),
            health,
        }
    }
}

#[async_trait]
impl SampleSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn run(self: Box<Self>, sink: SampleSink, mut shutdown: ShutdownGuard) {
        info!("Telemetry mock enabled (tick={:?})", self.tick);

        let mut signal = MockSignal::new(Instant::now());
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.health.set(SourceStatus::Running);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let sample = signal.next_sample(Instant::now(), rand::random::<f64>());
                    if sink.push(sample).await.is_err() {
                        info!("Hub stopped ingesting, mock source exiting");
                        break;
                    }
                }
                _ = shutdown.wait() => break,
            }
        }

        self.health.set(SourceStatus::Stopped);
    }
}
