use crate::{ConfigError, ConfigErrorResult};

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

// Serial baud rate constraints
pub const MIN_SERIAL_BAUD: u32 = 300;
pub const MAX_SERIAL_BAUD: u32 = 4_000_000;
pub const DEFAULT_SERIAL_BAUD: u32 = 115_200;
pub const DEFAULT_SERIAL_DEVICE: &str = "/dev/ttyUSB0";

// Mock tick constraints (milliseconds)
pub const MIN_MOCK_TICK_MS: u64 = 1;
pub const MAX_MOCK_TICK_MS: u64 = 10_000;
pub const DEFAULT_MOCK_TICK_MS: u64 = 5;

/// Which sample source drives the hub. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Serial,
    Mock,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(s: &str) -> ConfigErrorResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "serial" => Ok(Self::Serial),
            "mock" => Ok(Self::Mock),
            other => Err(ConfigError::source(format!(
                "unknown source kind '{other}', expected 'serial' or 'mock'"
            ))),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path, e.g. /dev/ttyUSB0 or COM3
    pub device: String,
    pub baud: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: String::from(DEFAULT_SERIAL_DEVICE),
            baud: DEFAULT_SERIAL_BAUD,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Interval between synthesized samples in milliseconds
    pub tick_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_MOCK_TICK_MS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub serial: SerialConfig,
    pub mock: MockConfig,
}

impl SourceConfig {
    /// Only the active variant's settings are checked.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.kind {
            SourceKind::Serial => {
                if self.serial.device.trim().is_empty() {
                    return Err(ConfigError::source(
                        "source.serial.device must be set when source.kind = \"serial\"",
                    ));
                }

                if !(MIN_SERIAL_BAUD..=MAX_SERIAL_BAUD).contains(&self.serial.baud) {
                    return Err(ConfigError::source(format!(
                        "source.serial.baud must be {}-{}, got {}",
                        MIN_SERIAL_BAUD, MAX_SERIAL_BAUD, self.serial.baud
                    )));
                }
            }
            SourceKind::Mock => {
                if !(MIN_MOCK_TICK_MS..=MAX_MOCK_TICK_MS).contains(&self.mock.tick_ms) {
                    return Err(ConfigError::source(format!(
                        "source.mock.tick_ms must be {}-{}, got {}",
                        MIN_MOCK_TICK_MS, MAX_MOCK_TICK_MS, self.mock.tick_ms
                    )));
                }
            }
        }

        Ok(())
    }
}
