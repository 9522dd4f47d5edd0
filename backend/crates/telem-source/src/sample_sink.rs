use crate::{SourceError, SourceResult};

use telem_core::Sample;

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::mpsc;

/// Single ingestion entry point shared by every source variant.
///
/// Bounded, so a stalled hub pushes back on the source instead of growing memory.
#[derive(Debug, Clone)]
pub struct SampleSink {
    tx: mpsc::Sender<Sample>,
}

impl SampleSink {
    /// Create the sink and the receiver the hub ingest loop drains.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Sample>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Waits for queue space; fails only once the hub has stopped ingesting.
    pub async fn push(&self, sample: Sample) -> SourceResult<()> {
        self.tx
            .send(sample)
            .await
            .map_err(|_| SourceError::SinkClosed {
                location: ErrorLocation::from(Location::caller()),
            })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
