use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

/// Lifecycle of the active sample source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    Starting,
    Running,
    /// Device open/read failed; the hub keeps serving what it has
    Degraded,
    Stopped,
}

impl SourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Degraded => "degraded",
            Self::Stopped => "stopped",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Starting,
            1 => Self::Running,
            2 => Self::Degraded,
            _ => Self::Stopped,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Running => 1,
            Self::Degraded => 2,
            Self::Stopped => 3,
        }
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared, lock-free view of the source status for health reporting.
#[derive(Debug, Clone, Default)]
pub struct SourceHealth {
    inner: Arc<HealthInner>,
}

#[derive(Debug, Default)]
struct HealthInner {
    status: AtomicU8,
    discarded: AtomicU64,
}

impl SourceHealth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SourceStatus {
        SourceStatus::from_u8(self.inner.status.load(Ordering::Acquire))
    }

    pub fn set(&self, status: SourceStatus) {
        let previous = self.inner.status.swap(status.as_u8(), Ordering::AcqRel);
        if previous != status.as_u8() {
            log::debug!(
                "Source status {} -> {}",
                SourceStatus::from_u8(previous),
                status
            );
        }
    }

    /// Count a record that failed to parse
    pub fn record_discarded(&self) {
        self.inner.discarded.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("telem.source.discarded").increment(1);
    }

    pub fn discarded(&self) -> u64 {
        self.inner.discarded.load(Ordering::Relaxed)
    }
}
