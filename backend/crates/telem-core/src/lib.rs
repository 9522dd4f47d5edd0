pub mod error;
pub mod rate_meter;
pub mod ring_buffer;
pub mod sample;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod telemetry_snapshot;

pub use error::{CoreError, Result as CoreResult};
pub use rate_meter::RateMeter;
pub use ring_buffer::RingBuffer;
pub use sample::Sample;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use telemetry_snapshot::TelemetrySnapshot;

#[cfg(test)]
mod tests;

/// Milliseconds in one minute; the unit the rate meter reports in.
pub const MILLIS_PER_MINUTE: u64 = 60_000;
