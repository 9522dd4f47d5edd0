use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Ring buffer capacity constraints (samples)
pub const MIN_BUFFER_CAPACITY: usize = 1;
pub const MAX_BUFFER_CAPACITY: usize = 1_000_000;
pub const DEFAULT_BUFFER_CAPACITY: usize = 5000;

// Per-subscriber backlog threshold constraints (bytes)
pub const MIN_BACKLOG_THRESHOLD_BYTES: usize = 1024;
pub const MAX_BACKLOG_THRESHOLD_BYTES: usize = 64 * 1024 * 1024;
pub const DEFAULT_BACKLOG_THRESHOLD_BYTES: usize = 256 * 1024;

// Rate window constraints (milliseconds)
pub const MIN_RATE_WINDOW_MS: u64 = 1000;
pub const MAX_RATE_WINDOW_MS: u64 = 3_600_000;
pub const DEFAULT_RATE_WINDOW_MS: u64 = 60_000;

// Source -> hub queue constraints (samples)
pub const MIN_INGEST_QUEUE_CAPACITY: usize = 1;
pub const MAX_INGEST_QUEUE_CAPACITY: usize = 65_536;
pub const DEFAULT_INGEST_QUEUE_CAPACITY: usize = 1024;

/// Telemetry hub settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Number of samples retained for snapshots
    pub buffer_capacity: usize,
    /// Outbound bytes a subscriber may have queued before new samples are dropped for it
    pub backlog_threshold_bytes: usize,
    /// Rate meter window length in milliseconds
    pub rate_window_ms: u64,
    /// Capacity of the queue between the sample source and the hub
    pub ingest_queue_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            backlog_threshold_bytes: DEFAULT_BACKLOG_THRESHOLD_BYTES,
            rate_window_ms: DEFAULT_RATE_WINDOW_MS,
            ingest_queue_capacity: DEFAULT_INGEST_QUEUE_CAPACITY,
        }
    }
}

impl HubConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_BUFFER_CAPACITY..=MAX_BUFFER_CAPACITY).contains(&self.buffer_capacity) {
            return Err(ConfigError::hub(format!(
                "hub.buffer_capacity must be {}-{}, got {}",
                MIN_BUFFER_CAPACITY, MAX_BUFFER_CAPACITY, self.buffer_capacity
            )));
        }

        if !(MIN_BACKLOG_THRESHOLD_BYTES..=MAX_BACKLOG_THRESHOLD_BYTES)
            .contains(&self.backlog_threshold_bytes)
        {
            return Err(ConfigError::hub(format!(
                "hub.backlog_threshold_bytes must be {}-{}, got {}",
                MIN_BACKLOG_THRESHOLD_BYTES,
                MAX_BACKLOG_THRESHOLD_BYTES,
                self.backlog_threshold_bytes
            )));
        }

        if !(MIN_RATE_WINDOW_MS..=MAX_RATE_WINDOW_MS).contains(&self.rate_window_ms) {
            return Err(ConfigError::hub(format!(
                "hub.rate_window_ms must be {}-{}, got {}",
                MIN_RATE_WINDOW_MS, MAX_RATE_WINDOW_MS, self.rate_window_ms
            )));
        }

        if !(MIN_INGEST_QUEUE_CAPACITY..=MAX_INGEST_QUEUE_CAPACITY)
            .contains(&self.ingest_queue_capacity)
        {
            return Err(ConfigError::hub(format!(
                "hub.ingest_queue_capacity must be {}-{}, got {}",
                MIN_INGEST_QUEUE_CAPACITY, MAX_INGEST_QUEUE_CAPACITY, self.ingest_queue_capacity
            )));
        }

        Ok(())
    }
}
