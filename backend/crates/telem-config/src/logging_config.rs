use crate::{DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_LEVEL, LogLevel};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Colored level names on stdout (ignored when logging to a file)
    pub colored: bool,
    /// Log file name inside `dir`; stdout when unset
    pub file: Option<String>,
    /// Log directory, relative to the config dir
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(DEFAULT_LOG_LEVEL),
            colored: true,
            file: None,
            dir: String::from(DEFAULT_LOG_DIRECTORY),
        }
    }
}
