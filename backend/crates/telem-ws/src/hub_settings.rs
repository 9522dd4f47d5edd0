use telem_config::HubConfig;

use std::time::Duration;

/// Settings injected into the hub at construction.
#[derive(Debug, Clone)]
pub struct HubSettings {
    /// Samples retained for pull snapshots
    pub buffer_capacity: usize,
    /// Outbound bytes a subscriber may have queued before samples are dropped for it
    pub backlog_threshold_bytes: usize,
    /// Rate meter window
    pub rate_window: Duration,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self::from(&HubConfig::default())
    }
}

impl From<&HubConfig> for HubSettings {
    fn from(config: &HubConfig) -> Self {
        Self {
            buffer_capacity: config.buffer_capacity,
            backlog_threshold_bytes: config.backlog_threshold_bytes,
            rate_window: Duration::from_millis(config.rate_window_ms),
        }
    }
}
