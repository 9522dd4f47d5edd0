use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Ring buffer capacity must be at least 1 {location}")]
    InvalidCapacity { location: ErrorLocation },

    #[error("Rate window must be at least 1ms {location}")]
    InvalidWindow { location: ErrorLocation },

    #[error("Malformed sample record '{record}': {reason} {location}")]
    MalformedRecord {
        record: String,
        reason: &'static str,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
