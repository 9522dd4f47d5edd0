use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("JSON encode failed: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Hub setup failed: {source} {location}")]
    HubSetup {
        #[source]
        source: telem_core::CoreError,
        location: ErrorLocation,
    },
}

impl From<serde_json::Error> for WsError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<telem_core::CoreError> for WsError {
    #[track_caller]
    fn from(source: telem_core::CoreError) -> Self {
        Self::HubSetup {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
