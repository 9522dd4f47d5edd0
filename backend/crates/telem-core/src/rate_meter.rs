use crate::{CoreError, CoreResult, MILLIS_PER_MINUTE};

use std::panic::Location;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;

/// Converts an ingestion count into a messages-per-minute estimate.
///
/// The window only rolls over inside [`RateMeter::tick`]. While ingestion is
/// paused the instantaneous rate keeps decaying because elapsed time grows
/// and the count does not.
#[derive(Debug, Clone)]
pub struct RateMeter {
    window: Duration,
    window_start: Instant,
    count: u64,
    /// Count of the most recently completed window
    last_window_count: u64,
}

impl RateMeter {
    #[track_caller]
    pub fn new(window: Duration, now: Instant) -> CoreResult<Self> {
        if window.as_millis() == 0 {
            return Err(CoreError::InvalidWindow {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            window,
            window_start: now,
            count: 0,
            last_window_count: 0,
        })
    }

    /// Count one ingested sample, rolling the window first if it has expired.
    pub fn tick(&mut self, now: Instant) {
        if now.saturating_duration_since(self.window_start) >= self.window {
            log::trace!(
                "Rate window rolled over after {} samples",
                self.count
            );
            self.last_window_count = self.count;
            self.count = 0;
            self.window_start = now;
        }
        self.count += 1;
    }

    /// Extrapolated messages per minute since the current window started.
    ///
    /// A `now` older than the current window start carries no information
    /// about the new window, so the last completed window's rate is reported.
    pub fn instant_rate(&self, now: Instant) -> u64 {
        if now < self.window_start {
            return self.windowed_rate();
        }

        let elapsed_ms = now
            .saturating_duration_since(self.window_start)
            .as_millis()
            .max(1);
        rounded_per_minute(self.count, elapsed_ms)
    }

    /// Messages per minute over the last completed window (0 until one completes).
    pub fn windowed_rate(&self) -> u64 {
        rounded_per_minute(self.last_window_count, self.window.as_millis())
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// round(count * 60000 / elapsed_ms), halves rounded up.
fn rounded_per_minute(count: u64, elapsed_ms: u128) -> u64 {
    let scaled = u128::from(count) * u128::from(MILLIS_PER_MINUTE);
    let rate = (scaled + elapsed_ms / 2) / elapsed_ms;
    u64::try_from(rate).unwrap_or(u64::MAX)
}
