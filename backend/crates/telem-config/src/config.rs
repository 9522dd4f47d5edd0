use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR, HubConfig,
    LoggingConfig, ServerConfig, SourceConfig, SourceKind,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub hub: HubConfig,
    pub source: SourceConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for TELEM_CONFIG_DIR env var, else use ./.telem/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply TELEM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: TELEM_CONFIG_DIR env var > ./.telem/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.hub.validate()?;
        self.source.validate()?;
        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref filename) => {
                let log_dir = Self::config_dir()?.join(&self.logging.dir);
                Ok(Some(log_dir.join(filename)))
            }
            None => Ok(None),
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);

        if let Some(ref dir) = self.server.static_dir {
            info!("  static assets: {}", dir);
        }

        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );

        info!(
            "  hub: buffer={}, backlog_threshold={}B, rate_window={}ms, queue={}",
            self.hub.buffer_capacity,
            self.hub.backlog_threshold_bytes,
            self.hub.rate_window_ms,
            self.hub.ingest_queue_capacity
        );

        match self.source.kind {
            SourceKind::Serial => info!(
                "  source: serial {} @ {}",
                self.source.serial.device, self.source.serial.baud
            ),
            SourceKind::Mock => info!("  source: mock (tick={}ms)", self.source.mock.tick_ms),
        }
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("TELEM_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("TELEM_SERVER_PORT", &mut self.server.port);
        Self::apply_env_option_string("TELEM_STATIC_DIR", &mut self.server.static_dir);

        // Logging
        Self::apply_env_parse("TELEM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("TELEM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("TELEM_LOG_FILE", &mut self.logging.file);

        // Hub
        Self::apply_env_parse("TELEM_BUFFER", &mut self.hub.buffer_capacity);
        Self::apply_env_parse(
            "TELEM_BACKLOG_THRESHOLD_BYTES",
            &mut self.hub.backlog_threshold_bytes,
        );
        Self::apply_env_parse("TELEM_RATE_WINDOW_MS", &mut self.hub.rate_window_ms);
        Self::apply_env_parse(
            "TELEM_INGEST_QUEUE_CAPACITY",
            &mut self.hub.ingest_queue_capacity,
        );

        // Source: TELEM_SOURCE names the kind; TELEM_MOCK=true wins over it
        Self::apply_env_parse("TELEM_SOURCE", &mut self.source.kind);
        let mut mock = self.source.kind == SourceKind::Mock;
        Self::apply_env_bool("TELEM_MOCK", &mut mock);
        self.source.kind = if mock {
            SourceKind::Mock
        } else {
            SourceKind::Serial
        };
        Self::apply_env_string("TELEM_SERIAL_PORT", &mut self.source.serial.device);
        Self::apply_env_parse("TELEM_SERIAL_BAUD", &mut self.source.serial.baud);
        Self::apply_env_parse("TELEM_MOCK_TICK_MS", &mut self.source.mock.tick_ms);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
