use crate::{CoreError, CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// One timestamped reading from the data source.
///
/// `t` is source-relative and expected (not enforced) to be non-decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: i64,
    pub v: f64,
}

impl Sample {
    pub fn new(t: i64, v: f64) -> Self {
        Self { t, v }
    }
}

/// Parses a `"<t>,<v>"` record as emitted by serial devices.
///
/// Fields past the second comma are ignored. `t` must be integral and `v`
/// finite.
impl FromStr for Sample {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        let caller = Location::caller();
        let record = s.trim();
        let malformed = |reason: &'static str| CoreError::MalformedRecord {
            record: record.to_string(),
            reason,
            location: ErrorLocation::from(caller),
        };

        let mut fields = record.split(',');
        let t_field = fields.next().map(str::trim).unwrap_or_default();
        let v_field = fields
            .next()
            .map(str::trim)
            .ok_or_else(|| malformed("missing value field"))?;

        let t = parse_timestamp(t_field).ok_or_else(|| malformed("timestamp is not an integer"))?;
        let v = v_field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed("value is not a finite number"))?;

        Ok(Self { t, v })
    }
}

fn parse_timestamp(field: &str) -> Option<i64> {
    if let Ok(t) = field.parse::<i64>() {
        return Some(t);
    }

    // Devices sometimes print "1234.0"; accept integral floats in range.
    let t = field.parse::<f64>().ok()?;
    if t.is_finite() && t.fract() == 0.0 && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}
