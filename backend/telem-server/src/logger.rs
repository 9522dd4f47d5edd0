use crate::error::{Result as ServerErrorResult, ServerError};

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

/// Initialize logger with fern
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stdout, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
#[track_caller]
pub fn initialize(
    log_level: telem_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let base_dispatch = Dispatch::new().level(level_filter);

    let dispatch = match log_file {
        Some(ref log_path) => {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ServerError::logger(format!(
                        "Failed to create log directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }

            let file = fern::log_file(log_path).map_err(|e| {
                ServerError::logger(format!(
                    "Failed to open log file {}: {e}",
                    log_path.display()
                ))
            })?;

            Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{date} - {level}] {message} [{target}]",
                        date = humantime::format_rfc3339(SystemTime::now()),
                        level = record.level(),
                        target = record.target(),
                    ))
                })
                .chain(file)
        }
        None if colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{date} - {level}] {message} [{target}]",
                        date = humantime::format_rfc3339(SystemTime::now()),
                        level = colors.color(record.level()),
                        target = record.target(),
                    ))
                })
                .chain(std::io::stdout())
        }
        // Plain output for non-TTY (systemd, docker logs)
        None => Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message} [{target}]",
                    date = humantime::format_rfc3339(SystemTime::now()),
                    level = record.level(),
                    target = record.target(),
                ))
            })
            .chain(std::io::stdout()),
    };

    base_dispatch
        .chain(dispatch)
        .apply()
        .map_err(|e| ServerError::logger(format!("Failed to initialize logger: {e}")))?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={}, stdout", level_filter),
    }

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}
