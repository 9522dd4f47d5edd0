use crate::{SampleSink, SampleSource, SourceError, SourceHealth, SourceResult, SourceStatus};

use telem_config::SerialConfig;
use telem_core::{Sample, ShutdownGuard};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::{error, info, trace, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Reads `"<t>,<v>"` records, one per line, from a serial device.
pub struct SerialSource {
    device: String,
    baud: u32,
    health: SourceHealth,
}

impl SerialSource {
    pub fn new(config: &SerialConfig, health: SourceHealth) -> Self {
        Self {
            device: config.device.clone(),
            baud: config.baud,
            health,
        }
    }

    fn open(&self) -> SourceResult<SerialStream> {
        tokio_serial::new(&self.device, self.baud)
            .open_native_async()
            .map_err(|source| SourceError::Open {
                device: self.device.clone(),
                baud: self.baud,
                source,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

#[async_trait]
impl SampleSource for SerialSource {
    fn name(&self) -> &'static str {
        "serial"
    }

    async fn run(self: Box<Self>, sink: SampleSink, mut shutdown: ShutdownGuard) {
        info!("Serial listening on {} @ {}", self.device, self.baud);

        let result = match self.open() {
            Ok(port) => {
                self.health.set(SourceStatus::Running);
                read_records(port, &sink, &self.health, &mut shutdown).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(count) => info!("Serial source stopped after {count} samples"),
            Err(SourceError::SinkClosed { .. }) => {
                info!("Hub stopped ingesting, serial source exiting")
            }
            Err(e) => {
                error!("Serial error: {e}");
                self.health.set(SourceStatus::Degraded);
                warn!("Serial source degraded; serving buffered data until shutdown");
                shutdown.wait().await;
            }
        }

        self.health.set(SourceStatus::Stopped);
    }
}

/// Pump newline-delimited records from `reader` into `sink` until shutdown.
///
/// Unparseable records are dropped and counted. Returns the number of samples
/// pushed when shutdown interrupts the loop; end of stream is an error.
pub async fn read_records<R>(
    reader: R,
    sink: &SampleSink,
    health: &SourceHealth,
    shutdown: &mut ShutdownGuard,
) -> SourceResult<u64>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::with_capacity(64);
    let mut pushed = 0u64;

    loop {
        line.clear();

        let read = tokio::select! {
            read = reader.read_until(b'\n', &mut line) => read?,
            _ = shutdown.wait() => return Ok(pushed),
        };

        if read == 0 {
            return Err(SourceError::DeviceClosed {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let record = String::from_utf8_lossy(&line);
        match record.parse::<Sample>() {
            Ok(sample) => {
                sink.push(sample).await?;
                pushed += 1;
            }
            Err(e) => {
                trace!("Discarding record: {e}");
                health.record_discarded();
            }
        }
    }
}
