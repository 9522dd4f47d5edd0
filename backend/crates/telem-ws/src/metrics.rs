use metrics::{counter, gauge};

/// Metrics collector for the telemetry hub
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "telem" }
    }

    /// Record one sample accepted by the hub
    pub fn sample_ingested(&self) {
        counter!(format!("{}.samples.ingested", self.prefix)).increment(1);
    }

    /// Record samples withheld from slow subscribers
    pub fn samples_dropped(&self, count: usize) {
        counter!(format!("{}.samples.dropped", self.prefix)).increment(count as u64);
    }

    /// Record the current rate estimates
    pub fn rate(&self, instant_mpm: u64, windowed_mpm: u64) {
        gauge!(format!("{}.rate.instant", self.prefix)).set(instant_mpm as f64);
        gauge!(format!("{}.rate.windowed", self.prefix)).set(windowed_mpm as f64);
    }

    /// Record subscriber registered
    pub fn subscriber_registered(&self, active: usize) {
        counter!(format!("{}.subscribers.registered", self.prefix)).increment(1);
        gauge!(format!("{}.subscribers.active", self.prefix)).set(active as f64);
    }

    /// Record subscriber removed
    pub fn subscriber_closed(&self, reason: &str, active: usize) {
        counter!(format!("{}.subscribers.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.subscribers.active", self.prefix)).set(active as f64);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
