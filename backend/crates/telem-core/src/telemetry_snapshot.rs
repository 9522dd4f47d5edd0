use crate::Sample;

use serde::{Deserialize, Serialize};

/// Point-in-time view served to viewers joining mid-stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Buffered samples, oldest first
    pub data: Vec<Sample>,
    /// Instantaneous messages-per-minute estimate
    pub mpm: u64,
    /// Messages withheld from slow subscribers since startup
    pub dropped: u64,
}
