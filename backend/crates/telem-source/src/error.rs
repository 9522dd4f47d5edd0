use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to open serial device {device} @ {baud}: {source} {location}")]
    Open {
        device: String,
        baud: u32,
        #[source]
        source: tokio_serial::Error,
        location: ErrorLocation,
    },

    #[error("Read failed: {source} {location}")]
    Read {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Device closed the stream {location}")]
    DeviceClosed { location: ErrorLocation },

    #[error("Hub is no longer accepting samples {location}")]
    SinkClosed { location: ErrorLocation },
}

impl From<std::io::Error> for SourceError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Read {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
