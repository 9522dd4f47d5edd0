use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] telem_config::ConfigError),

    #[error("Hub error: {0}")]
    Hub(#[from] telem_ws::WsError),

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Metrics exporter error: {message} {location}")]
    MetricsExporter {
        message: String,
        location: ErrorLocation,
    },
}

impl ServerError {
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn metrics_exporter(message: impl Into<String>) -> Self {
        Self::MetricsExporter {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
